//! User notifications raised by the paste pipeline.

use std::fmt;

use serde::Serialize;

/// How prominent a notification is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Something was pasted successfully
    Success,
    /// The paste fell back to the default behaviour
    Warning,
    /// The paste failed
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        f.write_str(name)
    }
}

/// Shows short messages to the user.
pub trait Notifier {
    /// Display `message` with the given severity.
    fn notify(&self, message: &str, severity: Severity);
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn notify(&self, message: &str, severity: Severity) {
        (**self).notify(message, severity)
    }
}

/// Routes notifications to the `log` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Success => log::info!("{}", message),
            Severity::Warning => log::warn!("{}", message),
            Severity::Error => log::error!("{}", message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_severity_display() {
        assert_eq!(Severity::Warning.to_string(), "warning");
        assert_eq!(serde_json::to_string(&Severity::Success).unwrap(), "\"success\"");
    }

    #[derive(Default)]
    struct Recorder {
        notices: RefCell<Vec<(Severity, String)>>,
    }

    impl Notifier for Recorder {
        fn notify(&self, message: &str, severity: Severity) {
            self.notices.borrow_mut().push((severity, message.to_string()));
        }
    }

    fn notify_twice<N: Notifier>(notifier: N) {
        notifier.notify("first", Severity::Success);
        notifier.notify("second", Severity::Warning);
    }

    #[test]
    fn test_notifier_by_reference() {
        let recorder = Recorder::default();
        notify_twice(&recorder);
        notify_twice(&&recorder);

        let notices = recorder.notices.borrow();
        assert_eq!(notices.len(), 4);
        assert_eq!(notices[0], (Severity::Success, "first".to_string()));
        assert_eq!(notices[3], (Severity::Warning, "second".to_string()));
    }
}
