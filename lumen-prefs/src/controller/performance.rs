use async_trait::async_trait;

use super::group::{GroupContext, PreferenceGroup};
use crate::error::PreferencesError;
use crate::observable::{ListenerRegistry, Observable};

pub const SHOW_FRAMES_CHART_KEY: &str = "performance.showFlutterFramesChart";
pub const INCLUDE_CPU_SAMPLES_KEY: &str = "performance.includeCpuSamplesInTimeline";

pub struct PerformancePreferences {
    context: GroupContext,
    listeners: ListenerRegistry,
    show_frames_chart: Observable<bool>,
    include_cpu_samples: Observable<bool>,
}

impl PerformancePreferences {
    pub fn new(context: GroupContext) -> Self {
        Self {
            context,
            listeners: ListenerRegistry::new(),
            show_frames_chart: Observable::new(true),
            include_cpu_samples: Observable::new(false),
        }
    }

    pub fn show_frames_chart(&self) -> &Observable<bool> {
        &self.show_frames_chart
    }

    pub fn include_cpu_samples(&self) -> &Observable<bool> {
        &self.include_cpu_samples
    }

    pub fn toggle_frames_chart(&self, show: Option<bool>) {
        if let Some(show) = show {
            self.show_frames_chart.set(show);
        }
    }

    pub fn toggle_include_cpu_samples(&self, include: Option<bool>) {
        if let Some(include) = include {
            self.include_cpu_samples.set(include);
        }
    }
}

#[async_trait]
impl PreferenceGroup for PerformancePreferences {
    fn name(&self) -> &'static str {
        "performance"
    }

    async fn init(&self) -> Result<(), PreferencesError> {
        self.context
            .bind_bool(&self.listeners, &self.show_frames_chart, SHOW_FRAMES_CHART_KEY, true)
            .await?;
        self.context
            .bind_bool(&self.listeners, &self.include_cpu_samples, INCLUDE_CPU_SAMPLES_KEY, false)
            .await
    }

    fn dispose(&self) {
        self.listeners.cancel_listeners();
    }
}
