/// Plain text rendering of session events
use pipechat_protocol::Event;

/// Formats an event the way it is shown to the user
pub fn describe(event: &Event) -> String {
    match event {
        Event::Connected(username) => format!("-- connected as {username} --"),
        Event::UsernameTaken => {
            "-- username already in use, pick another with /nick <name> --".to_string()
        }
        Event::InvalidMessage => "-- invalid chat message sent to server --".to_string(),
        Event::RosterChanged(names) => format!("-- users: {} --", names.join(", ")),
        Event::UserJoined(username) => format!("-- {username} joined --"),
        Event::UserParted(username) => format!("-- {username} left --"),
        Event::ChatReceived(msg) => format!("{}: {}", msg.sender, msg.body),
        Event::Disconnected => "-- disconnected --".to_string(),
    }
}

pub fn event(event: &Event) {
    println!("{}", describe(event));
}

pub fn notice(text: &str) {
    println!("-- {text} --");
}

pub fn own_message(username: &str, text: &str) {
    println!("{username} (you): {text}");
}

pub fn roster(names: &[String]) {
    if names.is_empty() {
        notice("nobody here");
    } else {
        println!("-- users: {} --", names.join(", "));
    }
}
