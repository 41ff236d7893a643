use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ViewName;
use crate::{CourseId, ResourceId};

const COURSE_ID: &str = "courseId";
const RESOURCE_ID: &str = "resourceId";
const INITIAL_DATE: &str = "initialDate";

/// Keyed parameters attached to a navigation.
///
/// The bag is opaque to the history; typed accessors cover the keys the
/// engine itself produces.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NavParams(BTreeMap<String, String>);

impl NavParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn course(course_id: &CourseId) -> Self {
        Self::new().with(COURSE_ID, course_id.as_str())
    }

    #[must_use]
    pub fn task(resource_id: &ResourceId, course_id: &CourseId) -> Self {
        Self::new()
            .with(RESOURCE_ID, resource_id.as_str())
            .with(COURSE_ID, course_id.as_str())
    }

    #[must_use]
    pub fn calendar(initial_date: &str) -> Self {
        Self::new().with(INITIAL_DATE, initial_date)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn course_id(&self) -> Option<&str> {
        self.get(COURSE_ID)
    }

    #[must_use]
    pub fn resource_id(&self) -> Option<&str> {
        self.get(RESOURCE_ID)
    }

    #[must_use]
    pub fn initial_date(&self) -> Option<&str> {
        self.get(INITIAL_DATE)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// One addressable screen plus its parameters and breadcrumb label.
///
/// Immutable once built: the builder methods consume `self`, and there are no
/// setters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationState {
    view: ViewName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    params: Option<NavParams>,
    breadcrumb_label: String,
}

impl NavigationState {
    /// A state for `view` with no params and the view's default label.
    #[must_use]
    pub fn new(view: ViewName) -> Self {
        Self {
            view,
            params: None,
            breadcrumb_label: view.default_label(),
        }
    }

    pub fn with_params(mut self, params: NavParams) -> Self {
        self.params = Some(params);
        self
    }

    /// Override the breadcrumb label. Blank labels keep the default.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        let label = label.into();
        if !label.trim().is_empty() {
            self.breadcrumb_label = label;
        }
        self
    }

    #[must_use]
    pub fn view(&self) -> ViewName {
        self.view
    }

    #[must_use]
    pub fn params(&self) -> Option<&NavParams> {
        self.params.as_ref()
    }

    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.as_ref().and_then(|params| params.get(key))
    }

    #[must_use]
    pub fn breadcrumb_label(&self) -> &str {
        &self.breadcrumb_label
    }
}

#[cfg(test)]
mod tests {
    use super::{NavParams, NavigationState};
    use crate::{CourseId, ResourceId, ViewName};

    #[test]
    fn default_label_and_override() {
        let state = NavigationState::new(ViewName::Courses);
        assert_eq!(state.breadcrumb_label(), "My Courses");
        assert!(state.params().is_none());

        let labelled = NavigationState::new(ViewName::CourseDetail).with_label("Physics");
        assert_eq!(labelled.breadcrumb_label(), "Physics");

        let blank = NavigationState::new(ViewName::Files).with_label("  ");
        assert_eq!(blank.breadcrumb_label(), "Files");
    }

    #[test]
    fn task_params() {
        let params = NavParams::task(&ResourceId::new("r5"), &CourseId::new("1"));
        assert_eq!(params.resource_id(), Some("r5"));
        assert_eq!(params.course_id(), Some("1"));
        assert_eq!(params.len(), 2);

        let state = NavigationState::new(ViewName::TaskDetail).with_params(params);
        assert_eq!(state.param("courseId"), Some("1"));
        assert_eq!(state.param("missing"), None);
    }

    #[test]
    fn serializes_params_as_flat_map() {
        let state = NavigationState::new(ViewName::Calendar)
            .with_params(NavParams::calendar("2026-10-19"));
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["view"], "calendar");
        assert_eq!(json["params"]["initialDate"], "2026-10-19");
        assert_eq!(json["breadcrumbLabel"], "Calendar");
    }
}
