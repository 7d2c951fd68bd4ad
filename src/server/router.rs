use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};
use utoipa::{
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        board::{BoardDto, CreateBoardDto, UpdateBoardDto},
        column::{ColumnDto, ColumnType, CreateColumnDto, ReorderColumnDto, UpdateColumnDto},
        comment::{CommentContentDto, CommentDto, CommentEditDto},
        invitation::{
            InvitationBoardDto, InvitationDto, InviteDto, InviteResultDto, RespondInvitationDto,
            RespondResultDto,
        },
        notification::{
            MarkAllReadDto, NotificationDto, NotificationPageDto, PaginationDto, UnreadCountDto,
        },
        task::{CreateTaskDto, MoveTaskDto, TaskDto, TaskPriority, TaskStatus, UpdateTaskDto},
        user::UserSummaryDto,
    },
    server::{
        controller::{board, column, comment, invitation, notification, task},
        state::AppState,
    },
};

#[derive(OpenApi)]
#[openapi(
    info(title = "Kanban Board API"),
    paths(
        board::create_board,
        board::get_boards,
        board::get_board,
        board::update_board,
        board::delete_board,
        column::get_columns,
        column::create_column,
        column::update_column,
        column::delete_column,
        column::reorder_columns,
        task::create_task,
        task::get_tasks,
        task::get_task,
        task::update_task,
        task::delete_task,
        task::move_task,
        task::assign_user,
        task::unassign_user,
        comment::add_comment,
        comment::edit_comment,
        comment::delete_comment,
        invitation::invite_user,
        invitation::respond_to_invitation,
        invitation::get_received_invitations,
        invitation::leave_board,
        invitation::remove_member,
        notification::get_notifications,
        notification::get_unread_count,
        notification::mark_read,
        notification::mark_all_read,
        notification::delete_notification,
    ),
    components(schemas(
        ErrorDto,
        MessageDto,
        BoardDto,
        CreateBoardDto,
        UpdateBoardDto,
        ColumnDto,
        ColumnType,
        CreateColumnDto,
        UpdateColumnDto,
        ReorderColumnDto,
        TaskDto,
        CreateTaskDto,
        UpdateTaskDto,
        MoveTaskDto,
        TaskPriority,
        TaskStatus,
        CommentDto,
        CommentEditDto,
        CommentContentDto,
        InviteDto,
        InvitationDto,
        InvitationBoardDto,
        InviteResultDto,
        RespondInvitationDto,
        RespondResultDto,
        NotificationDto,
        NotificationPageDto,
        PaginationDto,
        UnreadCountDto,
        MarkAllReadDto,
        UserSummaryDto,
    )),
    modifiers(&BearerAuth),
    tags(
        (name = "board", description = "Boards"),
        (name = "column", description = "Columns and their order"),
        (name = "task", description = "Tasks, moves and assignees"),
        (name = "comment", description = "Task comments"),
        (name = "invitation", description = "Invitations and membership"),
        (name = "notification", description = "The caller's notifications")
    )
)]
pub struct ApiDoc;

/// Registers the `bearer_auth` scheme referenced by the protected paths.
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/boards", post(board::create_board).get(board::get_boards))
        .route(
            "/api/boards/invitations/received",
            get(invitation::get_received_invitations),
        )
        .route(
            "/api/boards/invitations/{invitation_id}/respond",
            post(invitation::respond_to_invitation),
        )
        .route(
            "/api/boards/{board_id}",
            get(board::get_board)
                .put(board::update_board)
                .delete(board::delete_board),
        )
        .route("/api/boards/{board_id}/invite", post(invitation::invite_user))
        .route("/api/boards/{board_id}/leave", post(invitation::leave_board))
        .route(
            "/api/boards/{board_id}/members/{member_id}",
            delete(invitation::remove_member),
        )
        .route(
            "/api/boards/{board_id}/columns",
            get(column::get_columns).post(column::create_column),
        )
        .route(
            "/api/boards/{board_id}/columns/reorder",
            put(column::reorder_columns),
        )
        .route(
            "/api/boards/{board_id}/columns/{column_id}",
            put(column::update_column).delete(column::delete_column),
        )
        .route(
            "/api/boards/{board_id}/columns/{column_id}/tasks",
            post(task::create_task).get(task::get_tasks),
        )
        .route(
            "/api/boards/{board_id}/tasks/{task_id}",
            get(task::get_task)
                .put(task::update_task)
                .delete(task::delete_task),
        )
        .route("/api/boards/{board_id}/tasks/{task_id}/move", put(task::move_task))
        .route(
            "/api/boards/{board_id}/tasks/{task_id}/assign/{user_id}",
            post(task::assign_user).delete(task::unassign_user),
        )
        .route(
            "/api/boards/{board_id}/tasks/{task_id}/comments",
            post(comment::add_comment),
        )
        .route(
            "/api/boards/{board_id}/tasks/{task_id}/comments/{comment_id}",
            put(comment::edit_comment).delete(comment::delete_comment),
        )
        .route("/api/notifications", get(notification::get_notifications))
        .route(
            "/api/notifications/unread-count",
            get(notification::get_unread_count),
        )
        .route(
            "/api/notifications/mark-all-read",
            patch(notification::mark_all_read),
        )
        .route(
            "/api/notifications/{notification_id}/read",
            patch(notification::mark_read),
        )
        .route(
            "/api/notifications/{notification_id}",
            delete(notification::delete_notification),
        )
        .merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod test {
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use chrono::Duration;
    use test_utils::{builder::TestBuilder, factory};
    use tower::ServiceExt;

    use super::*;
    use crate::{
        model::board::BoardDto,
        server::{
            error::AppError,
            service::auth::{AuthService, TokenKeys},
        },
    };

    fn request(method: Method, uri: &str, token: Option<&str>, body: Body) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder.body(body).unwrap()
    }

    /// Tests a protected route without a bearer token.
    ///
    /// Expected: 401 Unauthorized
    #[tokio::test]
    async fn rejects_request_without_token() -> Result<(), AppError> {
        let test = TestBuilder::new().with_board_tables().build().await.unwrap();
        let db = test.db.clone().unwrap();
        let app = router().with_state(AppState::new(db, TokenKeys::from_secret("test-secret")));

        let response = app
            .oneshot(request(Method::GET, "/api/boards", None, Body::empty()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        Ok(())
    }

    /// Tests creating a board through the HTTP layer.
    ///
    /// Expected: 201 Created with the three default columns and the caller as owner
    #[tokio::test]
    async fn creates_board_with_default_columns() -> Result<(), AppError> {
        let test = TestBuilder::new().with_board_tables().build().await.unwrap();
        let db = test.db.clone().unwrap();
        let keys = TokenKeys::from_secret("test-secret");
        let user = factory::user::create_user(&db).await?;
        let token = AuthService::new(&db, &keys).issue_token(user.id, Duration::hours(1))?;
        let app = router().with_state(AppState::new(db, keys));

        let response = app
            .oneshot(request(
                Method::POST,
                "/api/boards",
                Some(&token),
                Body::from(r#"{"name":"Sprint"}"#),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let board: BoardDto = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(board.name, "Sprint");
        assert_eq!(board.columns.len(), 3);
        assert_eq!(board.owner.id, user.id);

        Ok(())
    }

    /// Tests that the static invitation route is not captured by `{board_id}`.
    ///
    /// Expected: 200 OK with an empty list
    #[tokio::test]
    async fn routes_received_invitations_before_board_id() -> Result<(), AppError> {
        let test = TestBuilder::new().with_board_tables().build().await.unwrap();
        let db = test.db.clone().unwrap();
        let keys = TokenKeys::from_secret("test-secret");
        let user = factory::user::create_user(&db).await?;
        let token = AuthService::new(&db, &keys).issue_token(user.id, Duration::hours(1))?;
        let app = router().with_state(AppState::new(db, keys));

        let response = app
            .oneshot(request(
                Method::GET,
                "/api/boards/invitations/received",
                Some(&token),
                Body::empty(),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"[]");

        Ok(())
    }
}
