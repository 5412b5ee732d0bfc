//! Notification building for logged platform events.
//!
//! This module is SDK-agnostic: the bot's event handler maps raw gateway
//! events into the plain structs here, and [`LogEvent::build`] turns them
//! into a ready-to-send notification. Update events diff old against new
//! state through explicit field tables; an empty diff yields `None`, which
//! suppresses the notification entirely rather than sending an empty one.

use crate::core::logging::LogEventType;
use chrono::{DateTime, Utc};

/// Named permission bits, used to render allow/deny bitmask diffs.
pub const PERMISSION_FLAGS: &[(u64, &str)] = &[
    (1 << 0, "Manage Channel"),
    (1 << 1, "Manage Server"),
    (1 << 2, "Manage Permissions"),
    (1 << 3, "Manage Roles"),
    (1 << 4, "Manage Customisation"),
    (1 << 6, "Kick Members"),
    (1 << 7, "Ban Members"),
    (1 << 8, "Timeout Members"),
    (1 << 9, "Assign Roles"),
    (1 << 10, "Change Nickname"),
    (1 << 11, "Manage Nicknames"),
    (1 << 12, "Change Avatar"),
    (1 << 13, "Remove Avatars"),
    (1 << 20, "View Channel"),
    (1 << 21, "Read Message History"),
    (1 << 22, "Send Messages"),
    (1 << 23, "Manage Messages"),
    (1 << 24, "Manage Webhooks"),
    (1 << 25, "Invite Others"),
    (1 << 26, "Send Embeds"),
    (1 << 27, "Upload Files"),
    (1 << 28, "Masquerade"),
    (1 << 29, "React"),
    (1 << 30, "Connect"),
    (1 << 31, "Speak"),
    (1 << 32, "Video"),
    (1 << 33, "Mute Members"),
    (1 << 34, "Deafen Members"),
    (1 << 35, "Move Members"),
];

/// Decodes a permission bitmask into a comma-joined list of flag names,
/// or `"None"` when no known bit is set.
#[must_use]
pub fn decode_permissions(bitmask: u64) -> String {
    let names: Vec<&str> = PERMISSION_FLAGS
        .iter()
        .filter(|(bit, _)| bitmask & bit != 0)
        .map(|(_, name)| *name)
        .collect();
    if names.is_empty() {
        "None".to_string()
    } else {
        names.join(", ")
    }
}

/// Embed colors used across notifications.
const COLOR_REMOVED: u32 = 0xE74C3C;
const COLOR_CREATED: u32 = 0x2ECC71;
const COLOR_CHANGED: u32 = 0xF1C40F;

/// The user that caused an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorRef {
    /// Platform user id
    pub id: String,
    /// Whether the actor is a bot account
    pub is_bot: bool,
}

/// An attachment on a deleted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentRef {
    /// Original filename
    pub filename: String,
    /// Download URL
    pub url: String,
}

/// Context shared by message events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageInfo {
    /// Server the message belonged to
    pub server_id: String,
    /// Channel the message was in
    pub channel_id: String,
    /// The message id
    pub message_id: String,
    /// Message author
    pub author: ActorRef,
    /// Creation time if known
    pub timestamp: Option<DateTime<Utc>>,
}

/// Snapshot of a role's observable state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleState {
    /// Role id
    pub id: String,
    /// Role name
    pub name: String,
    /// Display color, if set
    pub color: Option<String>,
    /// Whether the role is mentionable
    pub mentionable: bool,
    /// Whether members are hoisted in the sidebar
    pub hoist: bool,
    /// Allowed-permission bitmask
    pub allow: u64,
    /// Denied-permission bitmask
    pub deny: u64,
    /// Sort rank
    pub rank: i64,
}

/// Snapshot of a channel's observable state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelState {
    /// Channel id
    pub id: String,
    /// Channel name
    pub name: String,
    /// Topic/description, if set
    pub description: Option<String>,
    /// Channel type label
    pub kind: String,
}

/// A loggable platform event, already scoped to a server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEvent {
    /// A message was deleted
    MessageDeleted {
        /// Message context
        message: MessageInfo,
        /// Original content, if the message was cached
        content: Option<String>,
        /// Attachments on the deleted message
        attachments: Vec<AttachmentRef>,
    },
    /// A message was edited
    MessageEdited {
        /// Message context
        message: MessageInfo,
        /// Content before the edit
        before: Option<String>,
        /// Content after the edit
        after: Option<String>,
    },
    /// A role was created
    RoleCreated {
        /// Server the role belongs to
        server_id: String,
        /// The new role
        role: RoleState,
    },
    /// A role changed
    RoleUpdated {
        /// Server the role belongs to
        server_id: String,
        /// State before the change
        old: RoleState,
        /// State after the change
        new: RoleState,
    },
    /// A role was deleted
    RoleDeleted {
        /// Server the role belonged to
        server_id: String,
        /// The removed role
        role: RoleState,
    },
    /// A channel was created
    ChannelCreated {
        /// Server the channel belongs to
        server_id: String,
        /// The new channel
        channel: ChannelState,
    },
    /// A channel changed
    ChannelUpdated {
        /// Server the channel belongs to
        server_id: String,
        /// State before the change
        old: ChannelState,
        /// State after the change
        new: ChannelState,
    },
    /// A channel was deleted
    ChannelDeleted {
        /// Server the channel belonged to
        server_id: String,
        /// The removed channel
        channel: ChannelState,
    },
}

/// A formatted notification ready to dispatch as an embed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Embed title
    pub title: String,
    /// Embed body
    pub description: String,
    /// Embed color
    pub color: u32,
}

/// Field table entry: label plus accessor/formatter.
type FieldSpec<T> = (&'static str, fn(&T) -> String);

/// Diffable role fields, excluding permissions (handled separately so
/// allow and deny diff independently).
const ROLE_FIELDS: [FieldSpec<RoleState>; 5] = [
    ("Name", |r| r.name.clone()),
    ("Color", |r| display_or_none(r.color.as_deref())),
    ("Mentionable", |r| r.mentionable.to_string()),
    ("Hoist", |r| r.hoist.to_string()),
    ("Rank", |r| r.rank.to_string()),
];

/// Diffable channel fields.
const CHANNEL_FIELDS: [FieldSpec<ChannelState>; 3] = [
    ("Name", |c| c.name.clone()),
    ("Description", |c| display_or_none(c.description.as_deref())),
    ("Type", |c| c.kind.clone()),
];

fn display_or_none(value: Option<&str>) -> String {
    value.unwrap_or("None").to_string()
}

/// Collects `**label:** old → new` lines for every field whose formatted
/// value changed.
fn diff_fields<T>(fields: &[FieldSpec<T>], old: &T, new: &T) -> Vec<String> {
    fields
        .iter()
        .filter_map(|(label, accessor)| {
            let before = accessor(old);
            let after = accessor(new);
            (before != after).then(|| format!("**{label}:** `{before}` → `{after}`"))
        })
        .collect()
}

/// Role diff over name, color, mentionable, hoist, permissions, and rank.
/// Allow and deny bitmasks are decoded and diffed independently.
fn diff_role(old: &RoleState, new: &RoleState) -> Vec<String> {
    let mut changes = diff_fields(&ROLE_FIELDS, old, new);

    let allow_before = decode_permissions(old.allow);
    let allow_after = decode_permissions(new.allow);
    if allow_before != allow_after {
        changes.push(format!(
            "**Permissions (Allow):** `{allow_before}` → `{allow_after}`"
        ));
    }

    let deny_before = decode_permissions(old.deny);
    let deny_after = decode_permissions(new.deny);
    if deny_before != deny_after {
        changes.push(format!(
            "**Permissions (Deny):** `{deny_before}` → `{deny_after}`"
        ));
    }

    changes
}

fn format_timestamp(timestamp: Option<DateTime<Utc>>) -> String {
    timestamp.map_or_else(
        || "**Time:** Unknown".to_string(),
        |t| format!("**Time:** <t:{}:F>", t.timestamp()),
    )
}

fn content_block(content: Option<&str>) -> String {
    let text = match content {
        Some(c) if !c.is_empty() => c,
        _ => "[No content]",
    };
    format!("```text\n{text}\n```")
}

impl LogEvent {
    /// The taxonomy event type this event resolves through.
    #[must_use]
    pub const fn event_type(&self) -> LogEventType {
        match self {
            Self::MessageDeleted { .. } => LogEventType::MessageDelete,
            Self::MessageEdited { .. } => LogEventType::MessageEdit,
            Self::RoleCreated { .. } => LogEventType::RoleCreate,
            Self::RoleUpdated { .. } => LogEventType::RoleUpdate,
            Self::RoleDeleted { .. } => LogEventType::RoleDelete,
            Self::ChannelCreated { .. } => LogEventType::ChannelCreate,
            Self::ChannelUpdated { .. } => LogEventType::ChannelUpdate,
            Self::ChannelDeleted { .. } => LogEventType::ChannelDelete,
        }
    }

    /// The server the event happened in.
    #[must_use]
    pub fn server_id(&self) -> &str {
        match self {
            Self::MessageDeleted { message, .. } | Self::MessageEdited { message, .. } => {
                &message.server_id
            }
            Self::RoleCreated { server_id, .. }
            | Self::RoleUpdated { server_id, .. }
            | Self::RoleDeleted { server_id, .. }
            | Self::ChannelCreated { server_id, .. }
            | Self::ChannelUpdated { server_id, .. }
            | Self::ChannelDeleted { server_id, .. } => server_id,
        }
    }

    /// True when the event originates from a bot account and should not be
    /// logged. Applies to delete events only.
    #[must_use]
    pub const fn from_bot_actor(&self) -> bool {
        match self {
            Self::MessageDeleted { message, .. } => message.author.is_bot,
            _ => false,
        }
    }

    /// Builds the notification for this event, or `None` when an update
    /// event carries no actual change.
    #[must_use]
    pub fn build(&self) -> Option<Notification> {
        match self {
            Self::MessageDeleted {
                message,
                content,
                attachments,
            } => {
                let mut description = format!(
                    "**Channel:** <#{}>\n**Author:** <@{}> (`{}`)\n{}\n\n**Content:**\n{}\n`Message ID:` `{}`",
                    message.channel_id,
                    message.author.id,
                    message.author.id,
                    format_timestamp(message.timestamp),
                    content_block(content.as_deref()),
                    message.message_id,
                );
                if !attachments.is_empty() {
                    let links: Vec<String> = attachments
                        .iter()
                        .map(|a| format!("[{}]({})", a.filename, a.url))
                        .collect();
                    description.push_str(&format!("\n\n**Attachments:**\n{}", links.join("\n")));
                }
                Some(Notification {
                    title: "🗑️ Message Deleted".to_string(),
                    description,
                    color: COLOR_REMOVED,
                })
            }
            Self::MessageEdited {
                message,
                before,
                after,
            } => Some(Notification {
                title: "✏️ Message Edited".to_string(),
                description: format!(
                    "**Channel:** <#{}>\n**Author:** <@{}> (`{}`)\n{}\n\n**Original Content:**\n{}\n**New Content:**\n{}\n`Message ID:` `{}`",
                    message.channel_id,
                    message.author.id,
                    message.author.id,
                    format_timestamp(message.timestamp),
                    content_block(before.as_deref()),
                    content_block(after.as_deref()),
                    message.message_id,
                ),
                color: COLOR_CHANGED,
            }),
            Self::RoleCreated { role, .. } => Some(Notification {
                title: "🆕 Role Created".to_string(),
                description: format!("**Role:** {} (`{}`)", role.name, role.id),
                color: COLOR_CREATED,
            }),
            Self::RoleUpdated { old, new, .. } => {
                let changes = diff_role(old, new);
                if changes.is_empty() {
                    return None;
                }
                Some(Notification {
                    title: "✏️ Role Updated".to_string(),
                    description: format!(
                        "**Role:** {} (`{}`)\n\n**Changes:**\n{}",
                        new.name,
                        new.id,
                        changes.join("\n")
                    ),
                    color: COLOR_CHANGED,
                })
            }
            Self::RoleDeleted { role, .. } => Some(Notification {
                title: "❌ Role Deleted".to_string(),
                description: format!("**Role:** {} (`{}`)", role.name, role.id),
                color: COLOR_REMOVED,
            }),
            Self::ChannelCreated { channel, .. } => Some(Notification {
                title: "🆕 Channel Created".to_string(),
                description: format!(
                    "**Channel:** <#{}> (`{}`)\n**Type:** `{}`",
                    channel.id, channel.id, channel.kind
                ),
                color: COLOR_CREATED,
            }),
            Self::ChannelUpdated { old, new, .. } => {
                let changes = diff_fields(&CHANNEL_FIELDS, old, new);
                if changes.is_empty() {
                    return None;
                }
                Some(Notification {
                    title: "✏️ Channel Updated".to_string(),
                    description: format!(
                        "**Channel:** <#{}> (`{}`)\n\n**Changes:**\n{}",
                        new.id,
                        new.id,
                        changes.join("\n")
                    ),
                    color: COLOR_CHANGED,
                })
            }
            Self::ChannelDeleted { channel, .. } => Some(Notification {
                title: "❌ Channel Deleted".to_string(),
                description: format!("**Channel:** {} (`{}`)", channel.name, channel.id),
                color: COLOR_REMOVED,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    fn role(name: &str, rank: i64, allow: u64, deny: u64) -> RoleState {
        RoleState {
            id: "role-1".to_string(),
            name: name.to_string(),
            color: None,
            mentionable: false,
            hoist: false,
            allow,
            deny,
            rank,
        }
    }

    fn channel(name: &str, description: Option<&str>) -> ChannelState {
        ChannelState {
            id: "chan-1".to_string(),
            name: name.to_string(),
            description: description.map(ToString::to_string),
            kind: "Text".to_string(),
        }
    }

    #[test]
    fn test_decode_permissions() {
        assert_eq!(decode_permissions(0), "None");
        assert_eq!(decode_permissions(1 << 7), "Ban Members");
        assert_eq!(
            decode_permissions((1 << 6) | (1 << 7)),
            "Kick Members, Ban Members"
        );
        // Unknown bits decode to nothing
        assert_eq!(decode_permissions(1 << 55), "None");
    }

    #[test]
    fn test_identical_role_update_is_suppressed() {
        let state = role("mods", 3, 1 << 7, 0);
        let event = LogEvent::RoleUpdated {
            server_id: "s".to_string(),
            old: state.clone(),
            new: state,
        };
        assert!(event.build().is_none());
    }

    #[test]
    fn test_role_rename_produces_single_change() {
        let event = LogEvent::RoleUpdated {
            server_id: "s".to_string(),
            old: role("mods", 3, 0, 0),
            new: role("admins", 3, 0, 0),
        };
        let notification = event.build().unwrap();
        assert!(notification.description.contains("**Name:** `mods` → `admins`"));
        assert!(!notification.description.contains("Rank"));
    }

    #[test]
    fn test_role_permission_diff_splits_allow_and_deny() {
        let event = LogEvent::RoleUpdated {
            server_id: "s".to_string(),
            old: role("mods", 3, 0, 1 << 6),
            new: role("mods", 3, 1 << 7, 0),
        };
        let notification = event.build().unwrap();
        assert!(
            notification
                .description
                .contains("**Permissions (Allow):** `None` → `Ban Members`")
        );
        assert!(
            notification
                .description
                .contains("**Permissions (Deny):** `Kick Members` → `None`")
        );
    }

    #[test]
    fn test_identical_channel_update_is_suppressed() {
        let state = channel("general", Some("chatter"));
        let event = LogEvent::ChannelUpdated {
            server_id: "s".to_string(),
            old: state.clone(),
            new: state,
        };
        assert!(event.build().is_none());
    }

    #[test]
    fn test_channel_description_change() {
        let event = LogEvent::ChannelUpdated {
            server_id: "s".to_string(),
            old: channel("general", None),
            new: channel("general", Some("rules inside")),
        };
        let notification = event.build().unwrap();
        assert!(
            notification
                .description
                .contains("**Description:** `None` → `rules inside`")
        );
    }

    #[test]
    fn test_message_delete_includes_content_and_attachments() {
        let event = LogEvent::MessageDeleted {
            message: MessageInfo {
                server_id: "s".to_string(),
                channel_id: "c".to_string(),
                message_id: "m".to_string(),
                author: ActorRef {
                    id: "u".to_string(),
                    is_bot: false,
                },
                timestamp: None,
            },
            content: Some("hello".to_string()),
            attachments: vec![AttachmentRef {
                filename: "cat.png".to_string(),
                url: "https://cdn.example/cat.png".to_string(),
            }],
        };
        let notification = event.build().unwrap();
        assert!(notification.description.contains("hello"));
        assert!(notification.description.contains("**Time:** Unknown"));
        assert!(
            notification
                .description
                .contains("[cat.png](https://cdn.example/cat.png)")
        );
    }

    #[test]
    fn test_empty_content_marker() {
        let event = LogEvent::MessageDeleted {
            message: MessageInfo {
                server_id: "s".to_string(),
                channel_id: "c".to_string(),
                message_id: "m".to_string(),
                author: ActorRef {
                    id: "u".to_string(),
                    is_bot: false,
                },
                timestamp: Some(Utc::now()),
            },
            content: None,
            attachments: vec![],
        };
        let notification = event.build().unwrap();
        assert!(notification.description.contains("[No content]"));
        assert!(!notification.description.contains("Unknown"));
    }

    #[test]
    fn test_bot_actor_suppression_applies_to_deletes_only() {
        let bot_author = ActorRef {
            id: "b".to_string(),
            is_bot: true,
        };
        let message = MessageInfo {
            server_id: "s".to_string(),
            channel_id: "c".to_string(),
            message_id: "m".to_string(),
            author: bot_author,
            timestamp: None,
        };
        let delete = LogEvent::MessageDeleted {
            message: message.clone(),
            content: None,
            attachments: vec![],
        };
        assert!(delete.from_bot_actor());

        let edit = LogEvent::MessageEdited {
            message,
            before: None,
            after: None,
        };
        assert!(!edit.from_bot_actor());
    }
}
