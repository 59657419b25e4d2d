//! Plain-text rendering. Every line ends in `\r\n`.

use mudengine_types::{Exit, Room, Zone};

/// Wraps a single message as one output line.
pub fn line(text: impl AsRef<str>) -> String {
    format!("{}\r\n", text.as_ref())
}

/// A three-line boxed heading.
pub fn banner(title: &str) -> String {
    const WIDTH: usize = 64;
    let bar = "═".repeat(WIDTH);
    format!("╔{bar}╗\r\n║{title:^width$}║\r\n╚{bar}╝\r\n\r\n", width = WIDTH)
}

/// What a player sees on entering or looking: title, description, the
/// obvious exits by their first keyword, and who else is here.
pub fn describe_room(room: &Room, others: &[String]) -> String {
    let mut out = format!("{}\r\n{}\r\n\r\n", room.title, room.description);

    let exits: Vec<&str> = room
        .exits
        .iter()
        .filter(|e| e.is_obvious())
        .map(|e| e.keywords.primary())
        .collect();
    if exits.is_empty() {
        out.push_str("There are no obvious exits.\r\n");
    } else {
        out.push_str(&format!("Obvious exits: {}\r\n", exits.join(", ")));
    }

    if !others.is_empty() {
        out.push_str(&format!("Also here: {}.\r\n", others.join(", ")));
    }

    out.push_str("\r\n");
    out
}

/// Builder view of one room, hidden exits included.
pub fn room_info(room: &Room) -> String {
    let mut out = banner("ROOM INFORMATION");
    out.push_str(&format!("ID:          {}\r\n", room.id));
    out.push_str(&format!("Title:       {}\r\n", room.title));
    out.push_str(&format!("Zone:        {}\r\n", room.zone_id));
    out.push_str(&format!("Terrain:     {}\r\n", room.terrain));
    out.push_str(&format!("Darkness:    {}/10\r\n", room.darkness));
    if room.has_trap() {
        out.push_str("Trap:        armed\r\n");
    }
    out.push_str(&format!("Description: {}\r\n\r\n", room.description));

    out.push_str("Exits:\r\n");
    if room.exits.is_empty() {
        out.push_str("  None\r\n");
    }
    for exit in &room.exits {
        out.push_str(&format!("  {}\r\n", exit_line(exit, exit.to.as_str())));
    }
    out
}

/// `[north, n] -> Destination (hidden) (locked)`
pub fn exit_line(exit: &Exit, destination: &str) -> String {
    let mut out = format!("[{}] -> {}", exit.keywords.as_slice().join(", "), destination);
    if exit.hidden {
        out.push_str(" (hidden)");
    }
    if exit.locked {
        out.push_str(" (locked)");
    }
    out
}

/// One entry of the zone listing.
pub fn zone_entry(zone: &Zone, room_count: usize) -> String {
    format!(
        "{} ({})\r\n  ID: {}\r\n  {}\r\n  Rooms: {}\r\n\r\n",
        zone.name, zone.theme, zone.id, zone.description, room_count
    )
}
