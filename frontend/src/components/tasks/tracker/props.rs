//! Defines the properties for the `TaskTrackerComponent`.

use serde_json::Value;
use yew::prelude::*;

/// Properties for the `TaskTrackerComponent`.
#[derive(Properties, PartialEq, Clone)]
pub struct TaskTrackerProps {
    /// Project identifier, or `GLOBAL` for jobs spanning every project.
    pub scope: AttrValue,

    /// Job category, e.g. `refresh-subscribers`. Also selects the launch endpoint.
    pub category: AttrValue,

    /// Text of the run button.
    pub label: AttrValue,

    /// Parameters sent with the launch request.
    #[prop_or_default]
    pub params: Value,
}
