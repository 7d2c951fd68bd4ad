//! Notification kinds, priorities and the drafts produced by board events.
//!
//! Services never write notification rows directly. They build `NotificationDraft`s with
//! the constructors here and hand them to the notification service once the board save
//! has succeeded.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::notification::{NotificationDto, NotificationPageDto, PaginationDto};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NotificationPriority {
    High,
    Medium,
    Low,
}

impl NotificationPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "HIGH" => Some(Self::High),
            "MEDIUM" => Some(Self::Medium),
            "LOW" => Some(Self::Low),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvitationOutcome {
    Sent,
    Declined,
    Expired,
}

/// Closed set of notification types, each with its own metadata shape.
///
/// Serialized adjacently tagged, e.g.
/// `{"type": "MEMBER_LEFT", "metadata": {"boardName": "Roadmap", "memberId": 4}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    content = "metadata",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum NotificationKind {
    BoardInvitation {
        invitation_id: i32,
        board_name: String,
        outcome: InvitationOutcome,
    },
    BoardDeleted {
        board_name: String,
    },
    MemberAdded {
        board_name: String,
        member_id: i32,
    },
    MemberLeft {
        board_name: String,
        member_id: i32,
    },
    MemberRemoved {
        board_name: String,
    },
    BoardUpdated {
        old_name: String,
        new_name: String,
        name_changed: bool,
        description_changed: bool,
    },
    Assigned {
        task_id: Uuid,
        task_title: String,
        column_id: Uuid,
    },
    TaskCompleted {
        task_id: Uuid,
        task_title: String,
        column_id: Uuid,
    },
    Mentioned {
        task_id: Uuid,
        task_title: String,
        comment_id: Uuid,
    },
}

pub const NOTIFICATION_TYPES: [&str; 9] = [
    "BOARD_INVITATION",
    "BOARD_DELETED",
    "MEMBER_ADDED",
    "MEMBER_LEFT",
    "MEMBER_REMOVED",
    "BOARD_UPDATED",
    "ASSIGNED",
    "TASK_COMPLETED",
    "MENTIONED",
];

impl NotificationKind {
    pub fn type_tag(&self) -> &'static str {
        match self {
            Self::BoardInvitation { .. } => "BOARD_INVITATION",
            Self::BoardDeleted { .. } => "BOARD_DELETED",
            Self::MemberAdded { .. } => "MEMBER_ADDED",
            Self::MemberLeft { .. } => "MEMBER_LEFT",
            Self::MemberRemoved { .. } => "MEMBER_REMOVED",
            Self::BoardUpdated { .. } => "BOARD_UPDATED",
            Self::Assigned { .. } => "ASSIGNED",
            Self::TaskCompleted { .. } => "TASK_COMPLETED",
            Self::Mentioned { .. } => "MENTIONED",
        }
    }

    /// Splits into the stored `(notification_type, metadata)` pair.
    pub fn encode(&self) -> Result<(String, serde_json::Value), serde_json::Error> {
        let mut value = serde_json::to_value(self)?;
        let metadata = value
            .get_mut("metadata")
            .map(serde_json::Value::take)
            .unwrap_or(serde_json::Value::Null);

        Ok((self.type_tag().to_string(), metadata))
    }

    /// Rebuilds a kind from its stored pair.
    #[cfg(test)]
    pub fn decode(
        notification_type: &str,
        metadata: serde_json::Value,
    ) -> Result<Self, serde_json::Error> {
        serde_json::from_value(serde_json::json!({
            "type": notification_type,
            "metadata": metadata,
        }))
    }
}

/// A notification waiting to be recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationDraft {
    pub recipient_id: i32,
    pub sender_id: i32,
    pub board_id: i32,
    pub priority: NotificationPriority,
    pub message: String,
    pub kind: NotificationKind,
}

impl NotificationDraft {
    pub fn invitation_sent(
        invitation_id: i32,
        board_id: i32,
        board_name: &str,
        inviter_id: i32,
        invitee_id: i32,
    ) -> Self {
        Self {
            recipient_id: invitee_id,
            sender_id: inviter_id,
            board_id,
            priority: NotificationPriority::Medium,
            message: format!("You have been invited to join the board \"{}\"", board_name),
            kind: NotificationKind::BoardInvitation {
                invitation_id,
                board_name: board_name.to_string(),
                outcome: InvitationOutcome::Sent,
            },
        }
    }

    pub fn invitation_accepted(
        board_id: i32,
        board_name: &str,
        inviter_id: i32,
        member_id: i32,
    ) -> Self {
        Self {
            recipient_id: inviter_id,
            sender_id: member_id,
            board_id,
            priority: NotificationPriority::Low,
            message: format!("A new member has joined your board \"{}\"", board_name),
            kind: NotificationKind::MemberAdded {
                board_name: board_name.to_string(),
                member_id,
            },
        }
    }

    pub fn invitation_declined(
        invitation_id: i32,
        board_id: i32,
        board_name: &str,
        inviter_id: i32,
        invitee_id: i32,
    ) -> Self {
        Self {
            recipient_id: inviter_id,
            sender_id: invitee_id,
            board_id,
            priority: NotificationPriority::Low,
            message: format!("Your invitation to board \"{}\" was declined", board_name),
            kind: NotificationKind::BoardInvitation {
                invitation_id,
                board_name: board_name.to_string(),
                outcome: InvitationOutcome::Declined,
            },
        }
    }

    /// Sent to the inviter by the sweep. The invitee is recorded as sender.
    pub fn invitation_expired(
        invitation_id: i32,
        board_id: i32,
        board_name: &str,
        inviter_id: i32,
        invitee_id: i32,
    ) -> Self {
        Self {
            recipient_id: inviter_id,
            sender_id: invitee_id,
            board_id,
            priority: NotificationPriority::Low,
            message: format!("Your invitation to board \"{}\" has expired", board_name),
            kind: NotificationKind::BoardInvitation {
                invitation_id,
                board_name: board_name.to_string(),
                outcome: InvitationOutcome::Expired,
            },
        }
    }

    pub fn member_left(board_id: i32, board_name: &str, owner_id: i32, member_id: i32) -> Self {
        Self {
            recipient_id: owner_id,
            sender_id: member_id,
            board_id,
            priority: NotificationPriority::Low,
            message: format!("A member has left your board \"{}\"", board_name),
            kind: NotificationKind::MemberLeft {
                board_name: board_name.to_string(),
                member_id,
            },
        }
    }

    pub fn member_removed(board_id: i32, board_name: &str, owner_id: i32, member_id: i32) -> Self {
        Self {
            recipient_id: member_id,
            sender_id: owner_id,
            board_id,
            priority: NotificationPriority::Medium,
            message: format!("You have been removed from the board \"{}\"", board_name),
            kind: NotificationKind::MemberRemoved {
                board_name: board_name.to_string(),
            },
        }
    }

    /// One `BOARD_UPDATED` per recipient.
    pub fn board_updated(
        board_id: i32,
        actor_id: i32,
        recipients: &[i32],
        old_name: &str,
        new_name: &str,
        name_changed: bool,
        description_changed: bool,
    ) -> Vec<Self> {
        let message = if name_changed {
            format!("Board \"{}\" was renamed to \"{}\"", old_name, new_name)
        } else {
            format!("Board \"{}\" was updated", new_name)
        };

        recipients
            .iter()
            .map(|&recipient_id| Self {
                recipient_id,
                sender_id: actor_id,
                board_id,
                priority: NotificationPriority::Low,
                message: message.clone(),
                kind: NotificationKind::BoardUpdated {
                    old_name: old_name.to_string(),
                    new_name: new_name.to_string(),
                    name_changed,
                    description_changed,
                },
            })
            .collect()
    }

    /// One `BOARD_DELETED` per recipient.
    pub fn board_deleted(
        board_id: i32,
        board_name: &str,
        actor_id: i32,
        recipients: &[i32],
    ) -> Vec<Self> {
        recipients
            .iter()
            .map(|&recipient_id| Self {
                recipient_id,
                sender_id: actor_id,
                board_id,
                priority: NotificationPriority::High,
                message: format!("The board \"{}\" has been deleted", board_name),
                kind: NotificationKind::BoardDeleted {
                    board_name: board_name.to_string(),
                },
            })
            .collect()
    }

    /// `ASSIGNED` for each assignee except the actor.
    pub fn assigned(
        board_id: i32,
        actor_id: i32,
        assignees: &[i32],
        task_id: Uuid,
        task_title: &str,
        column_id: Uuid,
    ) -> Vec<Self> {
        assignees
            .iter()
            .filter(|&&id| id != actor_id)
            .map(|&recipient_id| Self {
                recipient_id,
                sender_id: actor_id,
                board_id,
                priority: NotificationPriority::Medium,
                message: format!("You have been assigned to task \"{}\"", task_title),
                kind: NotificationKind::Assigned {
                    task_id,
                    task_title: task_title.to_string(),
                    column_id,
                },
            })
            .collect()
    }

    /// `TASK_COMPLETED` for each assignee except the actor.
    pub fn task_completed(
        board_id: i32,
        actor_id: i32,
        assignees: &[i32],
        task_id: Uuid,
        task_title: &str,
        column_id: Uuid,
    ) -> Vec<Self> {
        assignees
            .iter()
            .filter(|&&id| id != actor_id)
            .map(|&recipient_id| Self {
                recipient_id,
                sender_id: actor_id,
                board_id,
                priority: NotificationPriority::Low,
                message: format!("Task \"{}\" has been marked as completed", task_title),
                kind: NotificationKind::TaskCompleted {
                    task_id,
                    task_title: task_title.to_string(),
                    column_id,
                },
            })
            .collect()
    }

    /// `MENTIONED` for each mentioned user except the author.
    pub fn mentioned(
        board_id: i32,
        author_id: i32,
        mentions: &[i32],
        task_id: Uuid,
        task_title: &str,
        comment_id: Uuid,
    ) -> Vec<Self> {
        mentions
            .iter()
            .filter(|&&id| id != author_id)
            .map(|&recipient_id| Self {
                recipient_id,
                sender_id: author_id,
                board_id,
                priority: NotificationPriority::Medium,
                message: format!("You were mentioned in task \"{}\"", task_title),
                kind: NotificationKind::Mentioned {
                    task_id,
                    task_title: task_title.to_string(),
                    comment_id,
                },
            })
            .collect()
    }
}

/// A recorded notification.
///
/// Keeps the stored type tag and metadata as-is, so rows written by older versions
/// still load.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: i32,
    pub recipient_id: i32,
    pub sender_id: i32,
    pub board_id: i32,
    pub notification_type: String,
    pub priority: NotificationPriority,
    pub message: String,
    pub metadata: serde_json::Value,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    pub read_at: Option<DateTime<Utc>>,
}

/// Filters for listing a recipient's notifications.
#[derive(Debug, Clone, Default)]
pub struct NotificationFilter {
    pub notification_type: Option<String>,
    pub is_read: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct NotificationPage {
    pub notifications: Vec<Notification>,
    pub total: u64,
    pub page: u64,
    pub pages: u64,
}

impl NotificationPage {
    pub fn into_dto(self) -> NotificationPageDto {
        NotificationPageDto {
            notifications: self
                .notifications
                .into_iter()
                .map(Notification::into_dto)
                .collect(),
            pagination: PaginationDto {
                total: self.total,
                page: self.page,
                pages: self.pages,
            },
        }
    }
}

impl Notification {
    /// Converts an entity model to a domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(Notification)` - Successfully converted domain model
    /// - `Err(DbErr::Custom)` - Stored priority is not one of `HIGH`, `MEDIUM`, `LOW`
    pub fn from_entity(entity: entity::notification::Model) -> Result<Self, DbErr> {
        let priority = NotificationPriority::parse(&entity.priority).ok_or_else(|| {
            DbErr::Custom(format!(
                "Unknown priority '{}' on notification {}",
                entity.priority, entity.id
            ))
        })?;

        Ok(Self {
            id: entity.id,
            recipient_id: entity.recipient_id,
            sender_id: entity.sender_id,
            board_id: entity.board_id,
            notification_type: entity.notification_type,
            priority,
            message: entity.message,
            metadata: entity.metadata,
            is_read: entity.is_read,
            created_at: entity.created_at,
            read_at: entity.read_at,
        })
    }

    #[cfg(test)]
    pub fn kind(&self) -> Result<NotificationKind, serde_json::Error> {
        NotificationKind::decode(&self.notification_type, self.metadata.clone())
    }

    pub fn into_dto(self) -> NotificationDto {
        NotificationDto {
            id: self.id,
            recipient_id: self.recipient_id,
            sender_id: self.sender_id,
            board_id: self.board_id,
            notification_type: self.notification_type,
            priority: self.priority.as_str().to_string(),
            message: self.message,
            metadata: self.metadata,
            is_read: self.is_read,
            created_at: self.created_at,
            read_at: self.read_at,
        }
    }
}
