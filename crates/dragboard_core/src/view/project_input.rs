//! Project input form.
//!
//! # Responsibility
//! - Hold the three raw field values of the submission form.
//! - Validate them as a whole and create a project on success.
//!
//! # Invariants
//! - Either all three fields pass and exactly one project is added, or
//!   nothing is added and fields are kept for correction.
//! - Fields are reset to empty only after a successful add.

use crate::model::project::Project;
use crate::render::memory::ROOT_CONTAINER_ID;
use crate::render::{
    lock_host, ElementId, InsertPosition, MountRequest, RenderHost, RenderResult,
    SharedRenderHost,
};
use crate::store::project_store::ProjectStore;
use crate::validation::{Constraints, FieldValue, Validatable};
use crate::view::{mount, Component, SLOT_DESCRIPTION, SLOT_PEOPLE, SLOT_TITLE};
use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Template for the form.
pub const INPUT_TEMPLATE_ID: &str = "project-input";
/// Element id of the mounted form.
pub const INPUT_ELEMENT_ID: &str = "user-input";

/// Minimum description length in characters.
pub const DESCRIPTION_MIN_LENGTH: usize = 5;
/// Inclusive people range.
pub const PEOPLE_MIN: u32 = 1;
pub const PEOPLE_MAX: u32 = 6;

/// Business limits applied to a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputRules {
    pub description_min_length: usize,
    pub people_min: u32,
    pub people_max: u32,
}

impl Default for InputRules {
    fn default() -> Self {
        Self {
            description_min_length: DESCRIPTION_MIN_LENGTH,
            people_min: PEOPLE_MIN,
            people_max: PEOPLE_MAX,
        }
    }
}

/// Raw form values as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub title: String,
    pub description: String,
    pub people: String,
}

impl FormFields {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        people: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            people: people.into(),
        }
    }

    pub fn clear(&mut self) {
        self.title.clear();
        self.description.clear();
        self.people.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.description.is_empty() && self.people.is_empty()
    }
}

/// Submission that passed every check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedInput {
    pub title: String,
    pub description: String,
    pub people: u32,
}

/// Submission rejection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// One or more fields failed; labels are for diagnostics only.
    InvalidInput { fields: Vec<&'static str> },
}

impl Display for SubmitError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput { .. } => f.write_str("Invalid input, please try again!"),
        }
    }
}

impl Error for SubmitError {}

/// Numeric reading of the people field.
///
/// Blank text reads as `0`, unparsable text as NaN; both fail the range.
pub fn parse_people(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// Checks all three fields and returns the typed submission.
pub fn validate_submission(
    rules: &InputRules,
    fields: &FormFields,
) -> Result<ValidatedInput, SubmitError> {
    let people = parse_people(&fields.people);
    let checks = [
        Validatable::new(
            "title",
            FieldValue::Text(&fields.title),
            Constraints::new().required(),
        ),
        Validatable::new(
            "description",
            FieldValue::Text(&fields.description),
            Constraints::new()
                .required()
                .min_length(rules.description_min_length),
        ),
        Validatable::new(
            "people",
            FieldValue::Number(people),
            Constraints::new()
                .required()
                .min(f64::from(rules.people_min))
                .max(f64::from(rules.people_max)),
        ),
    ];

    let mut failed: Vec<&'static str> = checks
        .iter()
        .filter(|check| !check.is_valid())
        .map(|check| check.label)
        .collect();
    // `people` is a count; a fractional value in range is still rejected.
    if people.fract() != 0.0 && !failed.contains(&"people") {
        failed.push("people");
    }
    if !failed.is_empty() {
        return Err(SubmitError::InvalidInput { fields: failed });
    }

    Ok(ValidatedInput {
        title: fields.title.clone(),
        description: fields.description.clone(),
        // In range and integral after the checks above.
        people: people as u32,
    })
}

/// Mounted submission form bound to a store.
pub struct ProjectInput<'s> {
    store: &'s ProjectStore,
    host: SharedRenderHost,
    element_id: ElementId,
    fields: FormFields,
    rules: InputRules,
}

impl<'s> ProjectInput<'s> {
    /// Mounts the form at the start of `app` with default rules.
    pub fn new(store: &'s ProjectStore, host: SharedRenderHost) -> RenderResult<Self> {
        Self::with_rules(store, host, InputRules::default())
    }

    pub fn with_rules(
        store: &'s ProjectStore,
        host: SharedRenderHost,
        rules: InputRules,
    ) -> RenderResult<Self> {
        let element_id = mount(
            &mut *lock_host(&host),
            &MountRequest::new(INPUT_TEMPLATE_ID, ROOT_CONTAINER_ID, InsertPosition::Start)
                .with_element_id(INPUT_ELEMENT_ID),
        )?;
        let input = Self {
            store,
            host,
            element_id,
            fields: FormFields::default(),
            rules,
        };
        input.refresh();
        Ok(input)
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn set_title(&mut self, value: impl Into<String>) {
        self.fields.title = value.into();
        self.refresh();
    }

    pub fn set_description(&mut self, value: impl Into<String>) {
        self.fields.description = value.into();
        self.refresh();
    }

    pub fn set_people(&mut self, value: impl Into<String>) {
        self.fields.people = value.into();
        self.refresh();
    }

    /// Replaces all three fields at once.
    pub fn fill(&mut self, fields: FormFields) {
        self.fields = fields;
        self.refresh();
    }

    /// Validates the fields and adds a project.
    ///
    /// # Errors
    /// - Returns `SubmitError::InvalidInput` when any field fails; the store
    ///   is untouched and fields are kept.
    pub fn submit(&mut self) -> Result<Project, SubmitError> {
        let input = match validate_submission(&self.rules, &self.fields) {
            Ok(input) => input,
            Err(err) => {
                if let SubmitError::InvalidInput { fields } = &err {
                    warn!(
                        "event=submit_rejected module=input status=error fields={}",
                        fields.join(",")
                    );
                }
                return Err(err);
            }
        };

        let project = self
            .store
            .add_project(input.title, input.description, input.people);
        self.clear_inputs();
        Ok(project)
    }

    fn clear_inputs(&mut self) {
        self.fields.clear();
        self.refresh();
    }

    fn refresh(&self) {
        if let Err(err) = self.render_content(&mut *lock_host(&self.host)) {
            warn!("event=input_render module=input status=error error={err}");
        }
    }
}

impl Component for ProjectInput<'_> {
    fn element_id(&self) -> &str {
        &self.element_id
    }

    fn render_content(&self, host: &mut dyn RenderHost) -> RenderResult<()> {
        host.set_text(&self.element_id, SLOT_TITLE, &self.fields.title)?;
        host.set_text(&self.element_id, SLOT_DESCRIPTION, &self.fields.description)?;
        host.set_text(&self.element_id, SLOT_PEOPLE, &self.fields.people)
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_people, validate_submission, FormFields, InputRules, SubmitError};

    #[test]
    fn parse_people_follows_numeric_coercion() {
        assert_eq!(parse_people(""), 0.0);
        assert_eq!(parse_people(" 3 "), 3.0);
        assert!(parse_people("three").is_nan());
    }

    #[test]
    fn accepts_valid_submission() {
        let input = validate_submission(
            &InputRules::default(),
            &FormFields::new("Title", "Long enough", "3"),
        )
        .expect("valid input should pass");
        assert_eq!(input.people, 3);
        assert_eq!(input.title, "Title");
    }

    #[test]
    fn reports_every_failed_field() {
        let err = validate_submission(&InputRules::default(), &FormFields::new(" ", "abc", "9"))
            .expect_err("all fields invalid");
        assert_eq!(
            err,
            SubmitError::InvalidInput {
                fields: vec!["title", "description", "people"]
            }
        );
        assert_eq!(err.to_string(), "Invalid input, please try again!");
    }

    #[test]
    fn rejects_fractional_people() {
        let err = validate_submission(
            &InputRules::default(),
            &FormFields::new("Title", "Long enough", "2.5"),
        )
        .expect_err("fractional people must fail");
        assert_eq!(
            err,
            SubmitError::InvalidInput {
                fields: vec!["people"]
            }
        );
    }

    #[test]
    fn custom_rules_change_limits() {
        let rules = InputRules {
            description_min_length: 1,
            people_min: 1,
            people_max: 10,
        };
        assert!(validate_submission(&rules, &FormFields::new("T", "d", "10")).is_ok());
    }
}
