use thiserror::Error;

pub type MountResult<T> = Result<T, MountError>;

/// Why a behavior did not attach. None of these are fatal; the controller logs
/// them and carries on with the remaining behaviors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MountError {
    #[error("missing required element `{0}`")]
    MissingElement(&'static str),

    #[error("page is not flagged with class `{0}`")]
    PageNotFlagged(&'static str),

    #[error("`{0}` is already mounted")]
    AlreadyMounted(&'static str),

    #[error("dom call failed: {0}")]
    Dom(String),
}

impl MountError {
    pub fn dom(msg: impl Into<String>) -> Self {
        Self::Dom(msg.into())
    }

    /// Short machine-readable class used in log events.
    pub fn class(&self) -> &'static str {
        match self {
            Self::MissingElement(_) => "missing_element",
            Self::PageNotFlagged(_) => "page_not_flagged",
            Self::AlreadyMounted(_) => "already_mounted",
            Self::Dom(_) => "dom_error",
        }
    }
}

pub fn require<T>(selector: &'static str, found: Option<T>) -> MountResult<T> {
    found.ok_or(MountError::MissingElement(selector))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_passes_present_values_through() {
        assert_eq!(require(".name-highlight", Some(7)), Ok(7));
    }

    #[test]
    fn require_reports_the_missing_selector() {
        let err = require::<()>(".profile-image", None).expect_err("absent element");
        assert_eq!(err, MountError::MissingElement(".profile-image"));
        assert!(err.to_string().contains(".profile-image"));
        assert_eq!(err.class(), "missing_element");
    }

    #[test]
    fn display_strings_are_stable() {
        assert_eq!(
            MountError::PageNotFlagged("home-page").to_string(),
            "page is not flagged with class `home-page`"
        );
        assert_eq!(MountError::AlreadyMounted("shapes").to_string(), "`shapes` is already mounted");
        assert!(MountError::dom("boom").to_string().starts_with("dom call failed:"));
    }
}
