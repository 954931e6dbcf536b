use std::rc::Rc;
use leptos::task::spawn_local;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget};
use crate::core::console;
use crate::core::error::BoardError;
use crate::core::models::BoardAction;
use crate::core::services::Transport;
use super::controller::BoardController;
use super::dom::{self, EditBoardForm, TitleInput};
use super::snapshot::CardDrag;
use super::sortable::{self, SortableEvent, SortableOptions};
use super::surface::BoardSurface;

type SharedController<T, S> = Rc<BoardController<T, S>>;

fn on_click(target: &EventTarget, handler: impl FnMut(Event) + 'static) -> Result<(), BoardError> {
    let listener = Closure::<dyn FnMut(Event)>::new(handler);
    target
        .add_event_listener_with_callback("click", listener.as_ref().unchecked_ref())
        .map_err(|_| BoardError::MissingElement("click target"))?;
    listener.forget();
    Ok(())
}

fn read_card_drag(event: &SortableEvent) -> Result<CardDrag, BoardError> {
    let from = event.from_container();
    let to = event.to_container();
    Ok(CardDrag {
        same_container: from.is_same_node(Some(&to)),
        from: dom::read_column_cards(&from)?,
        to: dom::read_column_cards(&to)?,
        old_index: event.old_draggable_index(),
        new_index: event.new_draggable_index(),
    })
}

pub fn attach_card_sorting<T, S>(controller: &SharedController<T, S>, document: &Document) -> Result<usize, BoardError>
where
    T: Transport + 'static,
    S: BoardSurface + 'static,
{
    let containers = dom::query_all(document, dom::CARD_CONTAINER);
    for container in &containers {
        let controller = controller.clone();
        sortable::attach(container, &SortableOptions::cards(), move |event: SortableEvent| {
            match read_card_drag(&event) {
                Ok(drag) => {
                    let controller = controller.clone();
                    spawn_local(async move {
                        let _ = controller.on_card_drag_end(&drag).await;
                    });
                }
                Err(e) => controller.fail(BoardAction::ReorderCards, &e),
            }
        })?;
    }
    Ok(containers.len())
}

pub fn attach_column_sorting<T, S>(controller: &SharedController<T, S>, container: &Element) -> Result<(), BoardError>
where
    T: Transport + 'static,
    S: BoardSurface + 'static,
{
    let controller = controller.clone();
    sortable::attach(container, &SortableOptions::columns(), move |event: SortableEvent| {
        match dom::read_columns(&event.to_container()) {
            Ok(columns) => {
                let controller = controller.clone();
                spawn_local(async move {
                    let _ = controller.on_column_drag_end(&columns).await;
                });
            }
            Err(e) => controller.fail(BoardAction::ReorderColumns, &e),
        }
    })?;
    Ok(())
}

pub fn attach_rename<T, S>(controller: &SharedController<T, S>, document: &Document) -> Result<(), BoardError>
where
    T: Transport + 'static,
    S: BoardSurface + 'static,
{
    for modal in dom::query_all(document, dom::EDIT_BOARD) {
        let form = match EditBoardForm::read(&modal) {
            Ok(form) => form,
            Err(e) => {
                console::error(&format!("Skipping board editor: {}", e));
                continue;
            }
        };
        let controller = controller.clone();
        let submit = form.submit.clone();
        on_click(&submit, move |event| {
            event.prevent_default();
            let url = match dom::action_url(&form.submit, dom::EDIT_BOARD_SUBMIT) {
                Ok(url) => url,
                Err(e) => return controller.fail(BoardAction::Rename, &e),
            };
            let controller = controller.clone();
            let form = form.clone();
            spawn_local(async move {
                let _ = controller.rename_board(&url, &form.title, &form.label).await;
            });
        })?;
    }
    Ok(())
}

pub fn attach_set_default<T, S>(controller: &SharedController<T, S>, document: &Document) -> Result<(), BoardError>
where
    T: Transport + 'static,
    S: BoardSurface + 'static,
{
    // Delegated: default buttons can be re-rendered inside dropdowns.
    let controller = controller.clone();
    on_click(document, move |event| {
        let Some(button) = event
            .target()
            .and_then(|target| target.dyn_into::<Element>().ok())
            .and_then(|element| element.closest(dom::SET_DEFAULT_BOARD).ok().flatten())
        else {
            return;
        };
        event.prevent_default();
        let url = match dom::action_url(&button, dom::SET_DEFAULT_BOARD) {
            Ok(url) => url,
            Err(e) => return controller.fail(BoardAction::SetDefault, &e),
        };
        let controller = controller.clone();
        spawn_local(async move {
            let _ = controller.set_default_board(&url).await;
        });
    })
}

pub fn attach_delete<T, S>(controller: &SharedController<T, S>, document: &Document) -> Result<(), BoardError>
where
    T: Transport + 'static,
    S: BoardSurface + 'static,
{
    for button in dom::query_all(document, dom::DELETE_BOARD) {
        let controller = controller.clone();
        let target = button.clone();
        on_click(&target, move |event| {
            event.prevent_default();
            let url = match dom::action_url(&button, dom::DELETE_BOARD) {
                Ok(url) => url,
                Err(e) => return controller.fail(BoardAction::Delete, &e),
            };
            let controller = controller.clone();
            spawn_local(async move {
                let _ = controller.delete_board(&url).await;
            });
        })?;
    }
    Ok(())
}

pub fn attach_create<T, S>(controller: &SharedController<T, S>, document: &Document) -> Result<(), BoardError>
where
    T: Transport + 'static,
    S: BoardSurface + 'static,
{
    let Some(submit) = document.get_element_by_id(dom::NEW_BOARD_SUBMIT_ID) else {
        return Ok(());
    };
    let controller = controller.clone();
    let button = submit.clone();
    on_click(&submit, move |event| {
        event.prevent_default();
        let read = dom::action_url(&button, "#new_board_submit").and_then(|url| {
            let input = document_element(dom::NEW_BOARD_TITLE_ID)?;
            Ok((url, TitleInput::from_element(input, "#new_board")?))
        });
        let (url, title) = match read {
            Ok(read) => read,
            Err(e) => return controller.fail(BoardAction::Create, &e),
        };
        let controller = controller.clone();
        spawn_local(async move {
            let _ = controller.create_board(&url, &title).await;
        });
    })
}

fn document_element(id: &'static str) -> Result<Element, BoardError> {
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(id))
        .ok_or(BoardError::MissingElement(id))
}

/// Wires every board control found on the page.
pub fn attach_all<T, S>(
    controller: &SharedController<T, S>,
    document: &Document,
    column_container: Option<&Element>,
) -> Result<(), BoardError>
where
    T: Transport + 'static,
    S: BoardSurface + 'static,
{
    let card_columns = attach_card_sorting(controller, document)?;
    if let Some(container) = column_container {
        attach_column_sorting(controller, container)?;
    }
    attach_rename(controller, document)?;
    attach_set_default(controller, document)?;
    attach_delete(controller, document)?;
    attach_create(controller, document)?;
    console::log(&format!("Project board ready: {} card columns", card_columns));
    Ok(())
}
