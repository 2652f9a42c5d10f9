// Surface registry - In-memory drawing surfaces that keep the charts drawn on them
use crate::application::chart_renderer::ChartSink;
use crate::application::errors::RenderError;
use crate::domain::chart::{ChartConfig, SurfaceId};
use std::collections::{BTreeMap, HashSet};
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct SurfaceRegistry {
    available: HashSet<SurfaceId>,
    charts: Mutex<BTreeMap<SurfaceId, ChartConfig>>,
}

impl SurfaceRegistry {
    pub fn new(available: impl IntoIterator<Item = SurfaceId>) -> Self {
        Self {
            available: available.into_iter().collect(),
            charts: Mutex::new(BTreeMap::new()),
        }
    }

    /// Charts drawn so far, keyed by surface.
    pub fn charts(&self) -> BTreeMap<SurfaceId, ChartConfig> {
        match self.charts.lock() {
            Ok(charts) => charts.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl ChartSink for SurfaceRegistry {
    fn has_surface(&self, surface: SurfaceId) -> bool {
        self.available.contains(&surface)
    }

    fn draw(&self, surface: SurfaceId, chart: ChartConfig) -> Result<(), RenderError> {
        if !self.has_surface(surface) {
            return Err(RenderError::Unavailable(surface));
        }

        let mut charts = self.charts.lock().map_err(|e| RenderError::Draw {
            surface,
            reason: e.to_string(),
        })?;
        charts.insert(surface, chart);
        Ok(())
    }
}
