// Chart renderer - Builds the five dashboard charts and hands them to a sink
use crate::application::errors::RenderError;
use crate::domain::chart::{self, ChartConfig, SurfaceId};
use crate::domain::dashboard::{DashboardData, Series};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Pause between surfaces becoming available and the first draw, so the
/// host layout can settle.
pub const DEFAULT_RENDER_DELAY: Duration = Duration::from_millis(200);

/// Something that can draw charts onto named surfaces.
pub trait ChartSink: Send + Sync {
    fn has_surface(&self, surface: SurfaceId) -> bool;

    fn draw(&self, surface: SurfaceId, chart: ChartConfig) -> Result<(), RenderError>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderReport {
    pub drawn: Vec<SurfaceId>,
    pub skipped: Vec<SurfaceId>,
    pub failed: Vec<SurfaceId>,
}

type ChartBuilder = fn(&Series) -> ChartConfig;

#[derive(Debug, Clone)]
pub struct ChartRenderer {
    delay: Duration,
}

impl Default for ChartRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_RENDER_DELAY)
    }
}

impl ChartRenderer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Draw every chart right away. Each surface is handled on its own; a
    /// missing surface or a failed draw never stops the others.
    pub fn render_now(&self, data: &DashboardData, sink: &dyn ChartSink) -> RenderReport {
        let plan: [(SurfaceId, Option<&Series>, ChartBuilder); 5] = [
            (SurfaceId::BranchPie, data.by_branch.as_ref(), chart::pie_chart),
            (SurfaceId::GenderPie, data.by_gender.as_ref(), chart::pie_chart),
            (SurfaceId::RecurrencePie, data.by_recurrence.as_ref(), chart::pie_chart),
            (SurfaceId::TimelineLine, data.timeline.as_ref(), chart::new_memberships_chart),
            (SurfaceId::RevenueLine, data.money_monthly.as_ref(), chart::revenue_chart),
        ];

        let mut report = RenderReport::default();
        for (surface, series, build) in plan {
            if !sink.has_surface(surface) {
                tracing::debug!("Skipping chart {} - surface not present", surface);
                report.skipped.push(surface);
                continue;
            }

            let Some(series) = series else {
                tracing::debug!("Skipping chart {} - no series in payload", surface);
                report.skipped.push(surface);
                continue;
            };

            match sink.draw(surface, build(series)) {
                Ok(()) => report.drawn.push(surface),
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to draw chart {}", surface);
                    report.failed.push(surface);
                }
            }
        }

        report
    }

    /// Draw after the configured delay on a background task. Dropping the
    /// returned handle before the delay elapses leaves every surface untouched.
    pub fn schedule(&self, data: Arc<DashboardData>, sink: Arc<dyn ChartSink>) -> PendingRender {
        let (cancel_tx, cancel_rx) = oneshot::channel::<()>();
        let renderer = self.clone();

        let task = tokio::spawn(async move {
            tokio::select! {
                _ = tokio::time::sleep(renderer.delay) => {
                    Some(renderer.render_now(&data, sink.as_ref()))
                }
                _ = cancel_rx => {
                    tracing::debug!("Chart render cancelled before drawing");
                    None
                }
            }
        });

        PendingRender {
            cancel: cancel_tx,
            task,
        }
    }
}

/// A render waiting for its delay to elapse.
pub struct PendingRender {
    cancel: oneshot::Sender<()>,
    task: JoinHandle<Option<RenderReport>>,
}

impl PendingRender {
    /// Wait for the render to run. `None` when it was cancelled.
    pub async fn finished(self) -> Option<RenderReport> {
        let PendingRender { cancel, task } = self;
        let report = match task.await {
            Ok(report) => report,
            Err(e) => {
                tracing::error!(error = %e, "Chart render task did not complete");
                None
            }
        };
        drop(cancel);
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chart::ChartType;
    use std::collections::HashSet;
    use std::sync::Mutex;

    struct RecordingSink {
        surfaces: HashSet<SurfaceId>,
        broken: Option<SurfaceId>,
        drawn: Mutex<Vec<(SurfaceId, ChartType)>>,
    }

    impl RecordingSink {
        fn with(surfaces: &[SurfaceId]) -> Self {
            Self {
                surfaces: surfaces.iter().copied().collect(),
                broken: None,
                drawn: Mutex::new(Vec::new()),
            }
        }

        fn drawn(&self) -> Vec<(SurfaceId, ChartType)> {
            self.drawn.lock().unwrap().clone()
        }
    }

    impl ChartSink for RecordingSink {
        fn has_surface(&self, surface: SurfaceId) -> bool {
            self.surfaces.contains(&surface)
        }

        fn draw(&self, surface: SurfaceId, chart: ChartConfig) -> Result<(), RenderError> {
            if self.broken == Some(surface) {
                return Err(RenderError::Draw {
                    surface,
                    reason: "canvas context lost".to_string(),
                });
            }
            self.drawn.lock().unwrap().push((surface, chart.chart_type));
            Ok(())
        }
    }

    fn full_data() -> DashboardData {
        let series = Series::new(vec![Some("a".into())], vec![1.0.into()]);
        DashboardData {
            by_branch: Some(series.clone()),
            by_gender: Some(series.clone()),
            by_recurrence: Some(series.clone()),
            timeline: Some(series.clone()),
            money_monthly: Some(series),
            ..Default::default()
        }
    }

    #[test]
    fn test_render_all_surfaces_once() {
        let sink = RecordingSink::with(&SurfaceId::ALL);
        let report = ChartRenderer::default().render_now(&full_data(), &sink);

        assert_eq!(report.drawn, SurfaceId::ALL.to_vec());
        assert!(report.skipped.is_empty());
        assert_eq!(
            sink.drawn(),
            vec![
                (SurfaceId::BranchPie, ChartType::Pie),
                (SurfaceId::GenderPie, ChartType::Pie),
                (SurfaceId::RecurrencePie, ChartType::Pie),
                (SurfaceId::TimelineLine, ChartType::Line),
                (SurfaceId::RevenueLine, ChartType::Line),
            ]
        );
    }

    #[test]
    fn test_missing_surfaces_are_skipped() {
        let sink = RecordingSink::with(&[SurfaceId::GenderPie, SurfaceId::RevenueLine]);
        let report = ChartRenderer::default().render_now(&full_data(), &sink);

        assert_eq!(report.drawn, vec![SurfaceId::GenderPie, SurfaceId::RevenueLine]);
        assert_eq!(
            report.skipped,
            vec![SurfaceId::BranchPie, SurfaceId::RecurrencePie, SurfaceId::TimelineLine]
        );
        assert!(report.failed.is_empty());
    }

    #[test]
    fn test_failed_draw_does_not_block_others() {
        let mut sink = RecordingSink::with(&SurfaceId::ALL);
        sink.broken = Some(SurfaceId::GenderPie);
        let report = ChartRenderer::default().render_now(&full_data(), &sink);

        assert_eq!(report.failed, vec![SurfaceId::GenderPie]);
        assert_eq!(report.drawn.len(), 4);
    }

    #[test]
    fn test_absent_series_is_skipped() {
        let mut data = full_data();
        data.money_monthly = None;
        let sink = RecordingSink::with(&SurfaceId::ALL);
        let report = ChartRenderer::default().render_now(&data, &sink);

        assert_eq!(report.skipped, vec![SurfaceId::RevenueLine]);
        assert_eq!(report.drawn.len(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_scheduled_render_waits_for_delay() {
        let sink = Arc::new(RecordingSink::with(&SurfaceId::ALL));
        let pending = ChartRenderer::default().schedule(Arc::new(full_data()), sink.clone());

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert!(sink.drawn().is_empty());

        let report = pending.finished().await.unwrap();
        assert_eq!(report.drawn.len(), 5);
        assert_eq!(sink.drawn().len(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_teardown_mid_delay_draws_nothing() {
        let sink = Arc::new(RecordingSink::with(&SurfaceId::ALL));
        let pending = ChartRenderer::default().schedule(Arc::new(full_data()), sink.clone());

        tokio::time::sleep(Duration::from_millis(50)).await;
        drop(pending);
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert!(sink.drawn().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_handle_cancels_render() {
        let sink = Arc::new(RecordingSink::with(&SurfaceId::ALL));
        drop(ChartRenderer::default().schedule(Arc::new(full_data()), sink.clone()));

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(sink.drawn().is_empty());
    }
}
