//! Command handlers.
//!
//! Each handler gets the shared engine state, the acting player, and the
//! words after the command. Privileged handlers check the actor's grants
//! before they read or write anything.

use mudengine_access::{Capability, Grantee};
use mudengine_store::Store;
use mudengine_types::{Darkness, ExitDraft, Keywords, RoomDraft, RoomId, ZoneDraft};
use mudengine_world::{Actor, WorldError};

use crate::commands::{Verb, expand_direction};
use crate::engine::EngineState;
use crate::render::{banner, describe_room, exit_line, line, room_info, zone_entry};
use crate::{Audience, MudError, Outcome};

/// Authoring and teleport.
const BUILDER: [Capability; 2] = [Capability::Builder, Capability::Admin];

/// Player listings.
const STAFF: [Capability; 2] = [Capability::Admin, Capability::Moderator];

const MOVE_USAGE: &str = "Move where?\r\n\
    Directions: north, south, east, west, northeast, northwest, southeast, southwest, up, down\r\n";

const NEW_ROOM_DESCRIPTION: &str =
    "A newly created room. Use 'room edit description' to set the description.";

type HandlerResult = Result<Outcome, MudError>;

/// Runs one resolved command.
pub(crate) async fn dispatch<S: Store>(
    state: &EngineState<S>,
    actor: &mut Actor,
    verb: Verb,
    args: &[&str],
) -> HandlerResult {
    match verb {
        Verb::Look => look(state, actor).await,
        Verb::Move => match args.first() {
            Some(dir) => walk(state, actor, &dir.to_lowercase()).await,
            None => Ok(Outcome::reply(MOVE_USAGE)),
        },
        Verb::Go(dir) => walk(state, actor, dir).await,
        Verb::Say => Ok(say(actor, args)),
        Verb::Quit => Ok(Outcome::quit("Goodbye!\r\n")),
        Verb::Teleport => {
            actor.require_any(&BUILDER)?;
            teleport(state, actor, args).await
        }
        Verb::Rooms => {
            actor.require_any(&BUILDER)?;
            list_rooms(state).await
        }
        Verb::Zones => {
            actor.require_any(&BUILDER)?;
            list_zones(state).await
        }
        Verb::Room => {
            actor.require_any(&BUILDER)?;
            room_command(state, actor, args).await
        }
        Verb::Exit => {
            actor.require_any(&BUILDER)?;
            exit_command(state, actor, args).await
        }
        Verb::Zone => {
            actor.require_any(&BUILDER)?;
            zone_command(state, args).await
        }
        Verb::Who => {
            actor.require_any(&STAFF)?;
            who(state).await
        }
    }
}

// ===========================================================================
// Everyone
// ===========================================================================

async fn look<S: Store>(state: &EngineState<S>, actor: &Actor) -> HandlerResult {
    let room = state.world.get(&actor.current_room).await?;
    let others = state.names_in(&room.id, &actor.id).await;
    Ok(Outcome::reply(describe_room(&room, &others)))
}

async fn walk<S: Store>(state: &EngineState<S>, actor: &mut Actor, dir: &str) -> HandlerResult {
    let moved = state.movement.walk(actor, dir).await?;
    let others = state.names_in(&moved.to.id, &actor.id).await;
    let direction = moved
        .exit
        .as_ref()
        .map_or(dir, |exit| exit.keywords.primary());

    Ok(Outcome::reply(describe_room(&moved.to, &others))
        .notify(
            Audience::RoomExcept {
                room: moved.from.clone(),
                except: actor.id.clone(),
            },
            format!("{} leaves {direction}.", actor.name),
        )
        .notify(
            Audience::RoomExcept {
                room: moved.to.id.clone(),
                except: actor.id.clone(),
            },
            format!("{} arrives.", actor.name),
        ))
}

fn say(actor: &Actor, args: &[&str]) -> Outcome {
    if args.is_empty() {
        return Outcome::reply("Say what?\r\n");
    }
    let message = args.join(" ");
    Outcome::reply(line(format!("You say, \"{message}\""))).notify(
        Audience::RoomExcept {
            room: actor.current_room.clone(),
            except: actor.id.clone(),
        },
        format!("{} says, \"{message}\"", actor.name),
    )
}

// ===========================================================================
// Builders
// ===========================================================================

async fn teleport<S: Store>(
    state: &EngineState<S>,
    actor: &mut Actor,
    args: &[&str],
) -> HandlerResult {
    if args.is_empty() {
        return Ok(Outcome::reply("Usage: teleport <room_id_or_title>\r\n"));
    }
    let target = args.join(" ");

    // An id first, then a title.
    let destination = match state.world.get(&RoomId::new(target.as_str())).await {
        Ok(room) => room.id.clone(),
        Err(WorldError::RoomNotFound(_)) => match state.world.find_room_by_title(&target).await {
            Some(room) => room.id.clone(),
            None => return Ok(Outcome::reply(line(format!("Room not found: {target}")))),
        },
        Err(err) => return Err(err.into()),
    };

    let moved = state.movement.teleport(actor, &destination).await?;
    let others = state.names_in(&moved.to.id, &actor.id).await;
    let mut outcome = Outcome::reply(format!(
        "You teleport to {}.\r\n\r\n{}",
        moved.to.title,
        describe_room(&moved.to, &others)
    ));
    if moved.from != moved.to.id {
        outcome = outcome
            .notify(
                Audience::RoomExcept {
                    room: moved.from.clone(),
                    except: actor.id.clone(),
                },
                format!("{} vanishes.", actor.name),
            )
            .notify(
                Audience::RoomExcept {
                    room: moved.to.id.clone(),
                    except: actor.id.clone(),
                },
                format!("{} appears out of thin air.", actor.name),
            );
    }
    Ok(outcome)
}

async fn list_rooms<S: Store>(state: &EngineState<S>) -> HandlerResult {
    let rooms = state.world.rooms().await;
    let zones = state.world.zones().await?;

    let mut out = banner("ROOM LIST");
    for zone in &zones {
        let mut in_zone = rooms.iter().filter(|r| r.zone_id == zone.id).peekable();
        if in_zone.peek().is_none() {
            continue;
        }
        out.push_str(&format!("Zone: {}\r\n{}\r\n", zone.name, "-".repeat(60)));
        for room in in_zone {
            out.push_str(&format!(
                "  {}\r\n    ID: {}\r\n    Exits: {}  Darkness: {}\r\n",
                room.title,
                room.id,
                room.exits.len(),
                room.darkness
            ));
        }
        out.push_str("\r\n");
    }
    out.push_str(&line(format!("Total: {} rooms", rooms.len())));
    Ok(Outcome::reply(out))
}

async fn list_zones<S: Store>(state: &EngineState<S>) -> HandlerResult {
    let zones = state.world.zones().await?;

    let mut out = banner("ZONE LIST");
    for zone in &zones {
        let rooms = state.world.rooms_in_zone(&zone.id).await?;
        out.push_str(&zone_entry(zone, rooms.len()));
    }
    out.push_str(&line(format!("Total: {} zones", zones.len())));
    Ok(Outcome::reply(out))
}

async fn room_command<S: Store>(
    state: &EngineState<S>,
    actor: &Actor,
    args: &[&str],
) -> HandlerResult {
    let Some((sub, rest)) = args.split_first() else {
        return Ok(Outcome::reply(
            "Room commands:\r\n\
             \x20 room create <title>     - Create a new room here\r\n\
             \x20 room edit <field>       - Edit current room\r\n\
             \x20 room info               - Show current room details\r\n\
             \x20 room delete <room_id>   - Delete a room (use with caution)\r\n",
        ));
    };

    match sub.to_lowercase().as_str() {
        "create" => room_create(state, actor, rest).await,
        "edit" => room_edit(state, actor, rest).await,
        "info" => {
            let room = state.world.get(&actor.current_room).await?;
            Ok(Outcome::reply(room_info(&room)))
        }
        "delete" => room_delete(state, rest).await,
        other => Ok(Outcome::reply(line(format!("Unknown room command: {other}")))),
    }
}

async fn room_create<S: Store>(
    state: &EngineState<S>,
    actor: &Actor,
    args: &[&str],
) -> HandlerResult {
    if args.is_empty() {
        return Ok(Outcome::reply(
            "Usage: room create <title>\r\nExample: room create The Dark Forest\r\n",
        ));
    }
    let title = args.join(" ");

    // New rooms join the builder's current zone.
    let here = state.world.get(&actor.current_room).await?;
    let draft =
        RoomDraft::new(here.zone_id.clone(), title).with_description(NEW_ROOM_DESCRIPTION);
    let room = state.world.create(draft).await?;

    Ok(Outcome::reply(format!(
        "Created room: {}\r\nRoom ID: {}\r\nUse 'exit create <direction> {}' to create an exit to this room.\r\n",
        room.title, room.id, room.id
    )))
}

async fn room_edit<S: Store>(
    state: &EngineState<S>,
    actor: &Actor,
    args: &[&str],
) -> HandlerResult {
    let Some((field, value)) = args.split_first() else {
        return Ok(Outcome::reply(
            "Usage: room edit <field> <value>\r\n\
             Fields: title, description, terrain, darkness\r\n\
             Example: room edit description A dark and foreboding forest path.\r\n",
        ));
    };
    let field = field.to_lowercase();
    if value.is_empty() {
        return Ok(Outcome::reply(line(format!("Please provide a value for {field}"))));
    }
    let value = value.join(" ");

    let mut room = (*state.world.get(&actor.current_room).await?).clone();
    match field.as_str() {
        "title" => room.title = value,
        "description" | "desc" => room.description = value,
        "terrain" => room.terrain = value,
        "darkness" => match value.parse::<u8>().ok().map(Darkness::new) {
            Some(Ok(darkness)) => room.darkness = darkness,
            _ => {
                return Ok(Outcome::reply(
                    "Darkness must be between 0 (daylight) and 10 (absolute darkness).\r\n",
                ));
            }
        },
        _ => return Ok(Outcome::reply(line(format!("Unknown field: {field}")))),
    }

    state.world.update(&room).await?;
    Ok(Outcome::reply(line(format!("Updated {field}."))))
}

async fn room_delete<S: Store>(state: &EngineState<S>, args: &[&str]) -> HandlerResult {
    let Some(target) = args.first() else {
        return Ok(Outcome::reply(
            "Usage: room delete <room_id>\r\nWarning: This permanently deletes the room!\r\n",
        ));
    };
    let room_id = RoomId::new(*target);

    if room_id == state.config.start_room {
        return Ok(Outcome::reply("Cannot delete the starting room.\r\n"));
    }

    match state.world.delete(&room_id).await {
        Ok(()) => Ok(Outcome::reply("Room deleted successfully.\r\n")),
        Err(WorldError::Occupied { players, .. }) => Ok(Outcome::reply(line(format!(
            "Cannot delete room: {players} player(s) currently in room."
        )))),
        Err(WorldError::RoomNotFound(_)) => {
            Ok(Outcome::reply(line(format!("Room not found: {target}"))))
        }
        Err(err) => Err(err.into()),
    }
}

async fn exit_command<S: Store>(
    state: &EngineState<S>,
    actor: &Actor,
    args: &[&str],
) -> HandlerResult {
    let Some((sub, rest)) = args.split_first() else {
        return Ok(Outcome::reply(
            "Exit commands:\r\n\
             \x20 exit create <direction> <room_id>  - Create an exit\r\n\
             \x20 exit delete <direction>             - Delete an exit\r\n\
             \x20 exit list                           - List all exits\r\n",
        ));
    };

    match sub.to_lowercase().as_str() {
        "create" => exit_create(state, actor, rest).await,
        "delete" => exit_delete(state, actor, rest).await,
        "list" => exit_list(state, actor).await,
        other => Ok(Outcome::reply(line(format!("Unknown exit command: {other}")))),
    }
}

async fn exit_create<S: Store>(
    state: &EngineState<S>,
    actor: &Actor,
    args: &[&str],
) -> HandlerResult {
    let [dir, destination, ..] = args else {
        return Ok(Outcome::reply(
            "Usage: exit create <direction> <destination_room_id>\r\n\
             Example: exit create north abc-123-def\r\n\
             Shortcuts: n, s, e, w, ne, nw, se, sw, u, d\r\n",
        ));
    };
    let dir = dir.to_lowercase();

    let destination = match state.world.get(&RoomId::new(*destination)).await {
        Ok(room) => room,
        Err(WorldError::RoomNotFound(id)) => {
            return Ok(Outcome::reply(line(format!("Destination room not found: {id}"))));
        }
        Err(err) => return Err(err.into()),
    };

    let keywords = Keywords::new(expand_direction(&dir))?;
    let mut draft = ExitDraft::new(actor.current_room.clone(), destination.id.clone(), keywords);
    draft.description = format!("An exit leading {dir}");
    state.world.create_exit(draft).await?;

    Ok(Outcome::reply(line(format!(
        "Created exit {dir} to {}",
        destination.title
    ))))
}

async fn exit_delete<S: Store>(
    state: &EngineState<S>,
    actor: &Actor,
    args: &[&str],
) -> HandlerResult {
    let Some(dir) = args.first() else {
        return Ok(Outcome::reply("Usage: exit delete <direction>\r\n"));
    };
    let dir = dir.to_lowercase();

    let exit = match state.world.find_exit(&actor.current_room, &dir).await {
        Ok(exit) => exit,
        Err(WorldError::ExitNotFound { .. }) => {
            return Ok(Outcome::reply(line(format!("No exit found in direction: {dir}"))));
        }
        Err(err) => return Err(err.into()),
    };
    state.world.delete_exit(&actor.current_room, &exit.id).await?;

    Ok(Outcome::reply(line(format!("Deleted exit {dir}"))))
}

async fn exit_list<S: Store>(state: &EngineState<S>, actor: &Actor) -> HandlerResult {
    let exits = state.world.exits(&actor.current_room).await?;
    if exits.is_empty() {
        return Ok(Outcome::reply("No exits from this room.\r\n"));
    }

    let mut out = String::from("Exits from this room:\r\n");
    for exit in &exits {
        let title = match state.world.get(&exit.to).await {
            Ok(room) => room.title.clone(),
            Err(_) => "Unknown".to_string(),
        };
        out.push_str(&format!("  {}\r\n", exit_line(exit, &title)));
    }
    Ok(Outcome::reply(out))
}

async fn zone_command<S: Store>(state: &EngineState<S>, args: &[&str]) -> HandlerResult {
    let Some((sub, rest)) = args.split_first() else {
        return Ok(Outcome::reply(
            "Zone commands:\r\n\
             \x20 zone create <name>  - Create a new zone\r\n\
             \x20 zone list           - List all zones\r\n",
        ));
    };

    match sub.to_lowercase().as_str() {
        "create" => {
            if rest.is_empty() {
                return Ok(Outcome::reply(
                    "Usage: zone create <name>\r\nExample: zone create The Dark Forest\r\n",
                ));
            }
            let mut draft = ZoneDraft::new(rest.join(" "));
            draft.description = "A newly created zone.".to_string();
            let zone = state.world.create_zone(draft).await?;
            Ok(Outcome::reply(format!(
                "Created zone: {}\r\nZone ID: {}\r\n",
                zone.name, zone.id
            )))
        }
        "list" => list_zones(state).await,
        other => Ok(Outcome::reply(line(format!("Unknown zone command: {other}")))),
    }
}

// ===========================================================================
// Staff
// ===========================================================================

async fn who<S: Store>(state: &EngineState<S>) -> HandlerResult {
    let locations = state.world.locations().await;

    let mut out = String::from("Players online:\r\n");
    for (player, room_id) in &locations {
        let name = state.name_of(player).await;
        let room = match state.world.get(room_id).await {
            Ok(room) => room.title.clone(),
            Err(_) => room_id.to_string(),
        };
        out.push_str(&format!("  {name} - {room}\r\n"));
    }
    out.push_str(&line(format!("Total: {} players", locations.len())));
    Ok(Outcome::reply(out))
}
