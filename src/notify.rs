use smartcity_core::gateways::{Level, Notification, Notify};

/// Prints notifications to the terminal.
pub struct ConsoleNotifier;

impl Notify for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        let Notification { level, message } = notification;
        match level {
            Level::Success => println!("{message}"),
            Level::Error => eprintln!("Error: {message}"),
        }
    }
}
