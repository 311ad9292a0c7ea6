use async_trait::async_trait;

use super::group::{GroupContext, PreferenceGroup};
use crate::error::PreferencesError;
use crate::observable::{ListenerRegistry, Observable};
use crate::values::StoredValue;

pub const HOVER_EVAL_MODE_KEY: &str = "inspector.hoverEvalMode";
pub const AUTO_REFRESH_KEY: &str = "inspector.autoRefreshEnabled";
pub const DEFAULT_DETAILS_VIEW_KEY: &str = "inspector.defaultDetailsView";

/// Which panel the inspector shows next to the widget tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailsViewType {
    #[default]
    LayoutExplorer,
    WidgetDetailsTree,
}

impl DetailsViewType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DetailsViewType::LayoutExplorer => "layoutExplorer",
            DetailsViewType::WidgetDetailsTree => "widgetDetailsTree",
        }
    }
}

impl StoredValue for DetailsViewType {
    fn to_stored(&self) -> String {
        self.as_str().to_string()
    }

    fn from_stored(raw: &str) -> Option<Self> {
        match raw {
            "layoutExplorer" => Some(DetailsViewType::LayoutExplorer),
            "widgetDetailsTree" => Some(DetailsViewType::WidgetDetailsTree),
            _ => None,
        }
    }
}

pub struct InspectorPreferences {
    context: GroupContext,
    listeners: ListenerRegistry,
    hover_eval_mode: Observable<bool>,
    auto_refresh_enabled: Observable<bool>,
    default_details_view: Observable<DetailsViewType>,
}

impl InspectorPreferences {
    pub fn new(context: GroupContext) -> Self {
        Self {
            context,
            listeners: ListenerRegistry::new(),
            hover_eval_mode: Observable::new(true),
            auto_refresh_enabled: Observable::new(true),
            default_details_view: Observable::new(DetailsViewType::default()),
        }
    }

    pub fn hover_eval_mode(&self) -> &Observable<bool> {
        &self.hover_eval_mode
    }

    pub fn auto_refresh_enabled(&self) -> &Observable<bool> {
        &self.auto_refresh_enabled
    }

    pub fn default_details_view(&self) -> &Observable<DetailsViewType> {
        &self.default_details_view
    }

    pub fn set_hover_eval_mode(&self, enabled: bool) {
        self.hover_eval_mode.set(enabled);
    }

    pub fn set_auto_refresh_enabled(&self, enabled: bool) {
        self.auto_refresh_enabled.set(enabled);
    }

    pub fn set_default_details_view(&self, view: DetailsViewType) {
        self.default_details_view.set(view);
    }
}

#[async_trait]
impl PreferenceGroup for InspectorPreferences {
    fn name(&self) -> &'static str {
        "inspector"
    }

    async fn init(&self) -> Result<(), PreferencesError> {
        self.context
            .bind_bool(&self.listeners, &self.hover_eval_mode, HOVER_EVAL_MODE_KEY, true)
            .await?;
        self.context
            .bind_bool(&self.listeners, &self.auto_refresh_enabled, AUTO_REFRESH_KEY, true)
            .await?;
        self.context
            .bind(
                &self.listeners,
                &self.default_details_view,
                DEFAULT_DETAILS_VIEW_KEY,
                DetailsViewType::default(),
            )
            .await
    }

    fn dispose(&self) {
        self.listeners.cancel_listeners();
    }
}
