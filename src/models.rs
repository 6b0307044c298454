use serde::{Deserialize, Serialize};

/// The four values collected by the contact form.
///
/// Serialized as-is into the JSON request body.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormFields {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl FormFields {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Subject => &self.subject,
            Field::Message => &self.message,
        }
    }

    pub fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Subject => &mut self.subject,
            Field::Message => &mut self.message,
        }
    }

    /// First field (in focus order) that is still empty
    pub fn first_missing(&self) -> Option<Field> {
        Field::ALL.into_iter().find(|f| self.get(*f).is_empty())
    }

    pub fn clear(&mut self) {
        *self = FormFields::default();
    }
}

/// A single form input
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Field {
    #[default]
    Name,
    Email,
    Subject,
    Message,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Email, Field::Subject, Field::Message];

    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "Full Name",
            Field::Email => "Email Address",
            Field::Subject => "Subject",
            Field::Message => "Message",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            Field::Name => "Enter your full name",
            Field::Email => "Enter your email address",
            Field::Subject => "Enter the subject",
            Field::Message => {
                "Tell us about your project, questions, or how you'd like to contribute..."
            }
        }
    }

    pub fn is_multiline(&self) -> bool {
        matches!(self, Field::Message)
    }

    pub fn next(&self) -> Field {
        match self {
            Field::Name => Field::Email,
            Field::Email => Field::Subject,
            Field::Subject => Field::Message,
            Field::Message => Field::Name,
        }
    }

    pub fn prev(&self) -> Field {
        match self {
            Field::Name => Field::Message,
            Field::Email => Field::Name,
            Field::Subject => Field::Email,
            Field::Message => Field::Subject,
        }
    }
}

/// Which of the two interchangeable servers receives the next submission
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Backend {
    #[default]
    Node,
    Python,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Node => "Node.js",
            Backend::Python => "Python",
        }
    }

    pub fn toggle(&self) -> Backend {
        match self {
            Backend::Node => Backend::Python,
            Backend::Python => Backend::Node,
        }
    }
}

/// Coarse classification of the status line, used for colouring
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum StatusKind {
    #[default]
    Idle,
    Pending,
    Success,
    Error,
}

#[derive(Clone, Copy, Debug)]
pub struct ContactDetail {
    pub label: &'static str,
    pub value: &'static str,
}

#[derive(Clone, Copy, Debug)]
pub struct SocialLink {
    pub name: &'static str,
    pub url: &'static str,
    pub caption: &'static str,
}
