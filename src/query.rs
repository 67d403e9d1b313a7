use crate::error::{RoverError, RoverResult};

/// Which mission day a photo listing is filtered by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayFilter {
    Sol(u32),
    EarthDate(String),
}

/// Options for the photo-listing endpoint.
///
/// `sol` and `earth_date` are mutually exclusive; a query holding both cannot
/// be constructed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhotoQuery {
    camera: Option<String>,
    day: Option<DayFilter>,
    page: Option<u32>,
}

impl PhotoQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn by_sol(sol: u32) -> Self {
        Self {
            day: Some(DayFilter::Sol(sol)),
            ..Self::default()
        }
    }

    pub fn by_earth_date(earth_date: impl Into<String>) -> Self {
        Self {
            day: Some(DayFilter::EarthDate(earth_date.into())),
            ..Self::default()
        }
    }

    /// Builds a query from independently optional fields, rejecting `sol`
    /// together with `earth_date`.
    pub fn try_new(
        camera: Option<String>,
        sol: Option<u32>,
        earth_date: Option<String>,
        page: Option<u32>,
    ) -> RoverResult<Self> {
        let day = match (sol, earth_date) {
            (Some(_), Some(_)) => {
                return Err(RoverError::InvalidArgument(
                    "specify only sol or earth_date, not both".to_string(),
                ))
            }
            (Some(sol), None) => Some(DayFilter::Sol(sol)),
            (None, Some(date)) => Some(DayFilter::EarthDate(date)),
            (None, None) => None,
        };

        Ok(Self { camera, day, page })
    }

    pub fn with_camera(mut self, camera: impl Into<String>) -> Self {
        self.camera = Some(camera.into());
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn camera(&self) -> Option<&str> {
        self.camera.as_deref()
    }

    pub fn day(&self) -> Option<&DayFilter> {
        self.day.as_ref()
    }

    pub fn page(&self) -> Option<u32> {
        self.page
    }

    /// Query-string pairs, excluding the API key.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(camera) = &self.camera {
            params.push(("camera", camera.clone()));
        }
        match &self.day {
            Some(DayFilter::Sol(sol)) => params.push(("sol", sol.to_string())),
            Some(DayFilter::EarthDate(date)) => params.push(("earth_date", date.clone())),
            None => {}
        }
        if let Some(page) = self.page {
            params.push(("page", page.to_string()));
        }
        params
    }
}
