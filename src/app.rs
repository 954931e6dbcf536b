use std::rc::Rc;
use leptos::prelude::*;
use leptos::task::spawn_local;
use crate::core::config::BoardConfig;
use crate::core::console;
use crate::core::error::BoardError;
use crate::core::models::{BoardAction, SyncStatus};
use crate::core::services::FetchTransport;
use crate::features::board::{dom, handlers, sortable};
use crate::features::board::{BoardController, BoardSurface, DomSurface, SyncIndicator};

/// `None` when this is not a projects page and nothing should be attached.
fn page_config() -> Option<Result<BoardConfig, BoardError>> {
    match BoardConfig::from_window() {
        Ok(config) if config.page_is_projects => Some(config.validate()),
        Ok(_) | Err(BoardError::MissingConfig) => None,
        Err(e) => Some(Err(e)),
    }
}

async fn start_board(config: BoardConfig, surface: DomSurface) -> Result<(), BoardError> {
    sortable::load(config.sortable_src.as_deref()).await?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or(BoardError::MissingElement("document"))?;
    let column_container = document.get_element_by_id(dom::BOARD_CONTAINER_ID);
    let base_url = column_container
        .as_ref()
        .and_then(|container| dom::data_attr(container, "url"))
        .unwrap_or_default();

    let controller = Rc::new(BoardController::new(config, base_url, FetchTransport, surface));
    handlers::attach_all(&controller, &document, column_container.as_ref())
}

/// Entry point: attaches the board controller when the page is a project board.
pub fn init_project() {
    let Some(config) = page_config() else {
        return;
    };

    let status = RwSignal::new(SyncStatus::Idle);
    leptos::mount::mount_to_body(move || view! { <SyncIndicator status=status /> });
    let surface = DomSurface::new(status);

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            console::error(&format!("Project board disabled: {}", e));
            surface.report(SyncStatus::failed(BoardAction::Setup, e.to_string()));
            return;
        }
    };

    spawn_local(async move {
        if let Err(e) = start_board(config, surface).await {
            console::error(&format!("Project board disabled: {}", e));
            surface.report(SyncStatus::failed(BoardAction::Setup, e.to_string()));
        }
    });
}
