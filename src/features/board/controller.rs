use std::future::Future;
use crate::core::config::BoardConfig;
use crate::core::console;
use crate::core::error::BoardError;
use crate::core::models::{BoardAction, SyncStatus};
use crate::core::services::{BoardApi, BoardRequest, HttpResponse, Transport};
use super::ordering::{card_moves, column_priorities};
use super::snapshot::{CardDrag, ColumnView};
use super::surface::{BoardSurface, LabelText, TitleField};

/// Turns board events into requests against one project's endpoints.
pub struct BoardController<T: Transport, S: BoardSurface> {
    api: BoardApi,
    transport: T,
    surface: S,
}

impl<T: Transport, S: BoardSurface> BoardController<T, S> {
    pub fn new(config: BoardConfig, base_url: impl Into<String>, transport: T, surface: S) -> Self {
        Self {
            api: BoardApi::new(base_url, config.csrf),
            transport,
            surface,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Logs the failure and puts it in front of the user.
    pub fn fail(&self, action: BoardAction, error: &BoardError) {
        console::error(&format!("Failed to {}: {}", action.as_str(), error));
        self.surface.report(SyncStatus::failed(action, error.to_string()));
    }

    async fn tracked<F>(&self, action: BoardAction, work: F) -> Result<(), BoardError>
    where
        F: Future<Output = Result<(), BoardError>>,
    {
        self.surface.report(SyncStatus::Saving(action));
        match work.await {
            Ok(()) => {
                self.surface.report(SyncStatus::Saved(action));
                Ok(())
            }
            Err(e) => {
                self.fail(action, &e);
                Err(e)
            }
        }
    }

    async fn dispatch(&self, request: BoardRequest) -> Result<HttpResponse, BoardError> {
        let response = self.transport.send(&request).await?;
        if !response.is_success() {
            return Err(BoardError::Status {
                status: response.status,
                url: request.url,
            });
        }
        Ok(response)
    }

    pub async fn on_card_drag_end(&self, drag: &CardDrag) -> Result<(), BoardError> {
        self.tracked(BoardAction::ReorderCards, async {
            let issues = card_moves(drag);
            console::log(&format!(
                "Reordering {} cards (column {} -> {})",
                issues.len(),
                drag.from.column_id,
                drag.to.column_id
            ));
            let request = self.api.update_issues_priorities(issues)?;
            let response = self.dispatch(request).await?;
            expect_json(&response)
        })
        .await
    }

    pub async fn on_column_drag_end(&self, columns: &[ColumnView]) -> Result<(), BoardError> {
        self.tracked(BoardAction::ReorderColumns, async {
            let request = self.api.update_board_priorities(column_priorities(columns))?;
            let response = self.dispatch(request).await?;
            expect_json(&response)
        })
        .await
    }

    pub async fn rename_board(
        &self,
        url: &str,
        title: &impl TitleField,
        label: &impl LabelText,
    ) -> Result<(), BoardError> {
        self.tracked(BoardAction::Rename, async {
            let new_title = title.title();
            self.dispatch(self.api.rename_board(url, &new_title)?).await?;
            label.set_text(&new_title);
            title.mark_clean();
            self.surface.close_modals();
            Ok(())
        })
        .await
    }

    pub async fn set_default_board(&self, url: &str) -> Result<(), BoardError> {
        self.tracked(BoardAction::SetDefault, async {
            self.dispatch(self.api.set_default_board(url)).await?;
            Ok(())
        })
        .await?;
        self.surface.reload();
        Ok(())
    }

    pub async fn delete_board(&self, url: &str) -> Result<(), BoardError> {
        self.tracked(BoardAction::Delete, async {
            self.dispatch(self.api.delete_board(url)).await?;
            Ok(())
        })
        .await?;
        self.surface.reload();
        Ok(())
    }

    pub async fn create_board(&self, url: &str, title: &impl TitleField) -> Result<(), BoardError> {
        self.tracked(BoardAction::Create, async {
            self.dispatch(self.api.create_board(url, &title.title())?).await?;
            title.mark_clean();
            Ok(())
        })
        .await?;
        self.surface.reload();
        Ok(())
    }
}

/// Reorder endpoints answer with JSON; an empty body is accepted.
fn expect_json(response: &HttpResponse) -> Result<(), BoardError> {
    if response.body.trim().is_empty() {
        return Ok(());
    }
    serde_json::from_str::<serde_json::Value>(&response.body)
        .map(|_| ())
        .map_err(|e| BoardError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;
    use futures::executor::block_on;
    use serde_json::{json, Value};
    use crate::core::services::{Method, CSRF_HEADER};
    use crate::features::board::snapshot::ColumnCards;

    #[derive(Default)]
    struct RecordingTransport {
        sent: RefCell<Vec<BoardRequest>>,
        replies: RefCell<VecDeque<Result<HttpResponse, BoardError>>>,
    }

    impl RecordingTransport {
        fn replying(reply: Result<HttpResponse, BoardError>) -> Self {
            let transport = Self::default();
            transport.replies.borrow_mut().push_back(reply);
            transport
        }

        fn body(&self, index: usize) -> Value {
            serde_json::from_str(self.sent.borrow()[index].body.as_deref().unwrap()).unwrap()
        }
    }

    impl Transport for RecordingTransport {
        async fn send(&self, request: &BoardRequest) -> Result<HttpResponse, BoardError> {
            self.sent.borrow_mut().push(request.clone());
            self.replies
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Ok(HttpResponse::ok("{}")))
        }
    }

    #[derive(Default)]
    struct FakeSurface {
        reloads: Cell<usize>,
        closed_modals: Cell<usize>,
        reports: RefCell<Vec<SyncStatus>>,
    }

    impl FakeSurface {
        fn last(&self) -> SyncStatus {
            self.reports.borrow().last().cloned().unwrap_or_default()
        }
    }

    impl BoardSurface for FakeSurface {
        fn reload(&self) {
            self.reloads.set(self.reloads.get() + 1);
        }

        fn close_modals(&self) {
            self.closed_modals.set(self.closed_modals.get() + 1);
        }

        fn report(&self, status: SyncStatus) {
            self.reports.borrow_mut().push(status);
        }
    }

    struct FakeInput {
        value: String,
        dirty: Cell<bool>,
    }

    impl FakeInput {
        fn new(value: &str) -> Self {
            Self { value: value.to_string(), dirty: Cell::new(true) }
        }
    }

    impl TitleField for FakeInput {
        fn title(&self) -> String {
            self.value.clone()
        }

        fn mark_clean(&self) {
            self.dirty.set(false);
        }
    }

    #[derive(Default)]
    struct FakeLabel(RefCell<String>);

    impl LabelText for FakeLabel {
        fn set_text(&self, text: &str) {
            *self.0.borrow_mut() = text.to_string();
        }
    }

    fn controller(transport: RecordingTransport) -> BoardController<RecordingTransport, FakeSurface> {
        BoardController::new(
            BoardConfig::new("csrf-123"),
            "/org/repo/projects/1",
            transport,
            FakeSurface::default(),
        )
    }

    fn server_error() -> Result<HttpResponse, BoardError> {
        Ok(HttpResponse { status: 500, body: String::new() })
    }

    #[test]
    fn card_drag_sends_one_put_with_destination_first() {
        let board = controller(RecordingTransport::default());
        let drag = CardDrag {
            from: ColumnCards::new(1, &[11]),
            to: ColumnCards::new(2, &[12, 21]),
            same_container: false,
            old_index: Some(1),
            new_index: Some(0),
        };
        block_on(board.on_card_drag_end(&drag)).unwrap();

        let sent = board.transport().sent.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].method, Method::Put);
        assert_eq!(sent[0].url, "/org/repo/projects/1/updateIssuesPriorities");
        drop(sent);
        assert_eq!(
            board.transport().body(0),
            json!({"issues": [
                {"id": 12, "priority": 0, "ProjectBoardID": 2},
                {"id": 21, "priority": 1, "ProjectBoardID": 2},
                {"id": 11, "priority": 0, "ProjectBoardID": 1},
            ]})
        );
        assert_eq!(board.surface().last(), SyncStatus::Saved(BoardAction::ReorderCards));
        assert_eq!(board.surface().reloads.get(), 0);
    }

    #[test]
    fn column_reorder_body_matches_dom_order() {
        let board = controller(RecordingTransport::default());
        let (x, y, z) = (5, 6, 7);
        let columns = [ColumnView::board(y), ColumnView::board(x), ColumnView::board(z)];
        block_on(board.on_column_drag_end(&columns)).unwrap();

        assert_eq!(board.transport().sent.borrow()[0].url, "/org/repo/projects/1/updatePriorities");
        assert_eq!(
            board.transport().body(0),
            json!({"boards": [
                {"id": y, "priority": 0},
                {"id": x, "priority": 1},
                {"id": z, "priority": 2},
            ]})
        );
    }

    #[test]
    fn failed_reorder_is_surfaced() {
        let board = controller(RecordingTransport::replying(Err(BoardError::Network("offline".into()))));
        let result = block_on(board.on_column_drag_end(&[ColumnView::board(1)]));

        assert_eq!(result, Err(BoardError::Network("offline".into())));
        match board.surface().last() {
            SyncStatus::Failed { action, message, .. } => {
                assert_eq!(action, BoardAction::ReorderColumns);
                assert!(message.contains("offline"));
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn non_json_reorder_reply_is_a_decode_error() {
        let board = controller(RecordingTransport::replying(Ok(HttpResponse::ok("<html>"))));
        let result = block_on(board.on_column_drag_end(&[ColumnView::board(1)]));
        assert!(matches!(result, Err(BoardError::Decode(_))));
    }

    #[test]
    fn rename_updates_label_and_closes_modal() {
        let board = controller(RecordingTransport::default());
        let input = FakeInput::new("Sprint 2");
        let label = FakeLabel::default();
        block_on(board.rename_board("/org/repo/projects/1/3", &input, &label)).unwrap();

        let sent = board.transport().sent.borrow();
        assert_eq!(sent[0].method, Method::Put);
        assert_eq!(sent[0].url, "/org/repo/projects/1/3");
        drop(sent);
        assert_eq!(board.transport().body(0), json!({"title": "Sprint 2"}));
        assert_eq!(*label.0.borrow(), "Sprint 2");
        assert!(!input.dirty.get());
        assert_eq!(board.surface().closed_modals.get(), 1);
        assert_eq!(board.surface().reloads.get(), 0);
    }

    #[test]
    fn failed_rename_leaves_label_alone() {
        let board = controller(RecordingTransport::replying(server_error()));
        let input = FakeInput::new("Sprint 2");
        let label = FakeLabel(RefCell::new("Sprint 1".to_string()));
        let result = block_on(board.rename_board("/p/3", &input, &label));

        assert_eq!(result, Err(BoardError::Status { status: 500, url: "/p/3".to_string() }));
        assert_eq!(*label.0.borrow(), "Sprint 1");
        assert!(input.dirty.get());
        assert_eq!(board.surface().closed_modals.get(), 0);
        assert!(board.surface().last().is_failed());
    }

    #[test]
    fn delete_and_set_default_reload_exactly_once() {
        let board = controller(RecordingTransport::default());
        block_on(board.delete_board("/p/3")).unwrap();
        assert_eq!(board.transport().sent.borrow().len(), 1);
        assert_eq!(board.transport().sent.borrow()[0].method, Method::Delete);
        assert_eq!(board.transport().sent.borrow()[0].body, None);
        assert_eq!(board.surface().reloads.get(), 1);

        let board = controller(RecordingTransport::default());
        block_on(board.set_default_board("/p/3/default")).unwrap();
        assert_eq!(board.transport().sent.borrow().len(), 1);
        assert_eq!(board.transport().sent.borrow()[0].method, Method::Post);
        assert_eq!(board.surface().reloads.get(), 1);
    }

    #[test]
    fn failed_delete_does_not_reload() {
        let board = controller(RecordingTransport::replying(server_error()));
        assert!(block_on(board.delete_board("/p/3")).is_err());
        assert_eq!(board.surface().reloads.get(), 0);
        assert!(board.surface().last().is_failed());
    }

    #[test]
    fn failed_set_default_does_not_reload() {
        let board = controller(RecordingTransport::replying(server_error()));
        let result = block_on(board.set_default_board("/p/3/default"));

        assert_eq!(result, Err(BoardError::Status { status: 500, url: "/p/3/default".to_string() }));
        assert_eq!(board.transport().sent.borrow().len(), 1);
        assert_eq!(board.surface().reloads.get(), 0);
        assert!(board.surface().last().is_failed());
    }

    #[test]
    fn failed_create_keeps_form_dirty_and_does_not_reload() {
        let board = controller(RecordingTransport::replying(server_error()));
        let input = FakeInput::new("Backlog");
        assert!(block_on(board.create_board("/p", &input)).is_err());

        assert!(input.dirty.get());
        assert_eq!(board.surface().reloads.get(), 0);
        assert!(board.surface().last().is_failed());
    }

    #[test]
    fn rename_without_a_label_still_saves() {
        let board = controller(RecordingTransport::default());
        let input = FakeInput::new("Sprint 2");
        block_on(board.rename_board("/p/3", &input, &None::<FakeLabel>)).unwrap();

        assert_eq!(board.transport().sent.borrow().len(), 1);
        assert_eq!(board.transport().body(0), json!({"title": "Sprint 2"}));
        assert!(!input.dirty.get());
        assert_eq!(board.surface().closed_modals.get(), 1);
    }

    #[test]
    fn optional_label_is_updated_when_present() {
        let label = Some(FakeLabel::default());
        label.set_text("Done");
        assert_eq!(*label.as_ref().unwrap().0.borrow(), "Done");
    }

    #[test]
    fn create_posts_title_then_reloads() {
        let board = controller(RecordingTransport::default());
        let input = FakeInput::new("Backlog");
        block_on(board.create_board("/org/repo/projects/1", &input)).unwrap();

        assert_eq!(board.transport().sent.borrow()[0].method, Method::Post);
        assert_eq!(board.transport().body(0), json!({"title": "Backlog"}));
        assert!(!input.dirty.get());
        assert_eq!(board.surface().reloads.get(), 1);
    }

    #[test]
    fn every_request_carries_the_configured_token() {
        let board = controller(RecordingTransport::default());
        let input = FakeInput::new("t");
        let label = FakeLabel::default();
        block_on(async {
            board.on_column_drag_end(&[ColumnView::board(1)]).await.unwrap();
            board
                .on_card_drag_end(&CardDrag {
                    from: ColumnCards::new(1, &[1]),
                    to: ColumnCards::new(1, &[1]),
                    same_container: true,
                    old_index: Some(0),
                    new_index: Some(0),
                })
                .await
                .unwrap();
            board.rename_board("/p/1", &input, &label).await.unwrap();
            board.set_default_board("/p/1/default").await.unwrap();
            board.delete_board("/p/1").await.unwrap();
            board.create_board("/p", &input).await.unwrap();
        });

        let sent = board.transport().sent.borrow();
        assert_eq!(sent.len(), 6);
        assert!(sent.iter().all(|r| r.header(CSRF_HEADER) == Some("csrf-123")));
    }

    #[test]
    fn saving_is_reported_before_the_outcome() {
        let board = controller(RecordingTransport::default());
        block_on(board.on_column_drag_end(&[])).unwrap();
        assert_eq!(
            *board.surface().reports.borrow(),
            vec![
                SyncStatus::Saving(BoardAction::ReorderColumns),
                SyncStatus::Saved(BoardAction::ReorderColumns),
            ]
        );
    }
}
