use crate::server::model::notification::{
    InvitationOutcome, NotificationDraft, NotificationKind, NotificationPriority,
};
use uuid::Uuid;

use super::default_board;

/// Tests the stored shape of a notification kind.
///
/// Expected: SCREAMING_SNAKE_CASE tag and camelCase metadata that decode back
#[test]
fn kind_encodes_to_tag_and_metadata() {
    let kind = NotificationKind::BoardInvitation {
        invitation_id: 9,
        board_name: "Roadmap".to_string(),
        outcome: InvitationOutcome::Declined,
    };

    let (tag, metadata) = kind.encode().unwrap();
    assert_eq!(tag, "BOARD_INVITATION");
    assert_eq!(metadata["invitationId"], 9);
    assert_eq!(metadata["boardName"], "Roadmap");
    assert_eq!(metadata["outcome"], "declined");

    assert_eq!(NotificationKind::decode(&tag, metadata).unwrap(), kind);
}

/// Tests that unknown tags are rejected on decode.
///
/// Expected: Err
#[test]
fn unknown_tag_does_not_decode() {
    assert!(NotificationKind::decode("BOARD_EXPLODED", serde_json::json!({})).is_err());
}

/// Tests board deletion fan-out.
///
/// Expected: one HIGH draft per member other than the actor
#[test]
fn board_deleted_fans_out_to_everyone_but_actor() {
    let mut board = default_board();
    board.members.extend([2, 3]);

    let recipients = board.audience_except(1);
    let drafts = NotificationDraft::board_deleted(board.id, &board.name, 1, &recipients);

    let ids: Vec<i32> = drafts.iter().map(|d| d.recipient_id).collect();
    assert_eq!(ids, vec![2, 3]);
    assert!(drafts
        .iter()
        .all(|d| d.priority == NotificationPriority::High && d.sender_id == 1));
}

/// Tests that a member updating the board still notifies the owner.
///
/// Expected: owner and other members receive LOW drafts
#[test]
fn board_updated_reaches_owner() {
    let mut board = default_board();
    board.members.extend([2, 3]);

    let recipients = board.audience_except(2);
    let drafts =
        NotificationDraft::board_updated(board.id, 2, &recipients, "Old", "New", true, false);

    let ids: Vec<i32> = drafts.iter().map(|d| d.recipient_id).collect();
    assert_eq!(ids, vec![1, 3]);
    assert!(drafts.iter().all(|d| d.priority == NotificationPriority::Low));
    assert_eq!(
        drafts[0].kind,
        NotificationKind::BoardUpdated {
            old_name: "Old".to_string(),
            new_name: "New".to_string(),
            name_changed: true,
            description_changed: false,
        }
    );
}

/// Tests that actors never notify themselves.
///
/// Expected: actor filtered out of assignment, completion and mention drafts
#[test]
fn task_drafts_skip_actor() {
    let task_id = Uuid::new_v4();
    let column_id = Uuid::new_v4();

    let assigned = NotificationDraft::assigned(1, 5, &[5, 6], task_id, "T", column_id);
    assert_eq!(assigned.len(), 1);
    assert_eq!(assigned[0].recipient_id, 6);
    assert_eq!(assigned[0].priority, NotificationPriority::Medium);

    let completed = NotificationDraft::task_completed(1, 5, &[5], task_id, "T", column_id);
    assert!(completed.is_empty());

    let mentioned = NotificationDraft::mentioned(1, 5, &[5, 7, 8], task_id, "T", Uuid::new_v4());
    let ids: Vec<i32> = mentioned.iter().map(|d| d.recipient_id).collect();
    assert_eq!(ids, vec![7, 8]);
}
