//! Multi-step registration form state.
//!
//! The form walks `Role -> Account -> Profile -> Review`. Each step only lets the
//! user continue once its own fields are valid, so the Next button can be driven
//! by [`RegistrationForm::can_advance`].

use serde::Serialize;
use thiserror::Error;

use crate::models::Role;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Step {
    #[default]
    Role,
    Account,
    Profile,
    Review,
}

impl Step {
    pub fn index(&self) -> usize {
        match self {
            Step::Role => 0,
            Step::Account => 1,
            Step::Profile => 2,
            Step::Review => 3,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Step::Role => "Who are you?",
            Step::Account => "Account",
            Step::Profile => "Profile",
            Step::Review => "Review",
        }
    }

    fn next(self) -> Self {
        match self {
            Step::Role => Step::Account,
            Step::Account => Step::Profile,
            Step::Profile | Step::Review => Step::Review,
        }
    }

    fn prev(self) -> Self {
        match self {
            Step::Role | Step::Account => Step::Role,
            Step::Profile => Step::Account,
            Step::Review => Step::Profile,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("Choose whether you are a student, parent or teacher")]
    MissingRole,
    #[error("Name is required")]
    MissingName,
    #[error("Please enter a valid email")]
    InvalidEmail,
    #[error("Password must be at least 8 characters")]
    ShortPassword,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("{0} is required")]
    MissingDetail(&'static str),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RegistrationForm {
    pub step: Step,
    pub role: Option<Role>,
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub phone: String,
    /// Grade level for students, child's name for parents, subject for teachers.
    pub detail: String,
}

/// Body sent to the `register` endpoint.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    pub role: Role,
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub child_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}

/// Label of the role-specific profile field.
pub fn detail_label(role: Role) -> &'static str {
    match role {
        Role::Student => "Grade level",
        Role::Parent => "Child's name",
        Role::Teacher => "Subject",
    }
}

impl RegistrationForm {
    pub fn new() -> Self {
        Self::default()
    }

    fn check_role(&self) -> Result<Role, RegistrationError> {
        self.role.ok_or(RegistrationError::MissingRole)
    }

    fn check_account(&self) -> Result<(), RegistrationError> {
        if self.name.trim().is_empty() {
            return Err(RegistrationError::MissingName);
        }
        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(RegistrationError::InvalidEmail);
        }
        if self.password.len() < 8 {
            return Err(RegistrationError::ShortPassword);
        }
        if self.password != self.confirm_password {
            return Err(RegistrationError::PasswordMismatch);
        }
        Ok(())
    }

    fn check_profile(&self, role: Role) -> Result<(), RegistrationError> {
        if self.detail.trim().is_empty() {
            return Err(RegistrationError::MissingDetail(detail_label(role)));
        }
        Ok(())
    }

    /// The first problem with the fields of the current and earlier steps.
    pub fn validate(&self) -> Result<(), RegistrationError> {
        let role = self.check_role()?;
        if self.step.index() > Step::Account.index() {
            self.check_account()?;
        }
        if self.step == Step::Review {
            self.check_profile(role)?;
        }
        Ok(())
    }

    /// Whether the current step's own fields allow moving on.
    pub fn can_advance(&self) -> bool {
        match self.step {
            Step::Role => self.role.is_some(),
            Step::Account => self.check_account().is_ok(),
            Step::Profile => self
                .role
                .is_some_and(|role| self.check_profile(role).is_ok()),
            Step::Review => false,
        }
    }

    /// Move to the next step, or report why not.
    pub fn advance(&mut self) -> Result<Step, RegistrationError> {
        match self.step {
            Step::Role => {
                self.check_role()?;
            }
            Step::Account => self.check_account()?,
            Step::Profile => {
                let role = self.check_role()?;
                self.check_profile(role)?;
            }
            Step::Review => {}
        }
        self.step = self.step.next();
        Ok(self.step)
    }

    pub fn back(&mut self) -> Step {
        self.step = self.step.prev();
        self.step
    }

    /// Build the request body once every step is valid.
    pub fn to_request(&self) -> Result<RegistrationRequest, RegistrationError> {
        let role = self.check_role()?;
        self.check_account()?;
        self.check_profile(role)?;

        let phone = Some(self.phone.trim().to_string()).filter(|p| !p.is_empty());
        let detail = Some(self.detail.trim().to_string());
        Ok(RegistrationRequest {
            role,
            name: self.name.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            password: self.password.clone(),
            phone,
            grade_level: detail.clone().filter(|_| role == Role::Student),
            child_name: detail.clone().filter(|_| role == Role::Parent),
            subject: detail.filter(|_| role == Role::Teacher),
        })
    }
}
