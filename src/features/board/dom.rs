use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlInputElement};
use crate::core::error::BoardError;
use super::snapshot::{CardView, ColumnCards, ColumnView};
use super::surface::{LabelText, TitleField};

pub const BOARD_CONTAINER_ID: &str = "board-container";
pub const CARD_CONTAINER: &str = ".draggable-cards";
pub const EDIT_BOARD: &str = ".edit-project-board";
pub const EDIT_BOARD_TITLE: &str = ".content > .form > .field > .project-board-title";
pub const EDIT_BOARD_SUBMIT: &str = ".content > .form > .actions > .red";
pub const BOARD_HEADER: &str = ".board-column-header";
pub const BOARD_LABEL: &str = ".board-label";
pub const SET_DEFAULT_BOARD: &str = ".set-default-project-board";
pub const DELETE_BOARD: &str = ".delete-project-board";
pub const NEW_BOARD_SUBMIT_ID: &str = "new_board_submit";
pub const NEW_BOARD_TITLE_ID: &str = "new_board";

const DIRTY_CLASS: &str = "dirty";

/// `data-<name>` on the element, if present.
pub fn data_attr(element: &Element, name: &str) -> Option<String> {
    element.get_attribute(&format!("data-{}", name))
}

pub fn parse_id(attribute: &'static str, raw: &str) -> Result<i64, BoardError> {
    raw.trim().parse::<i64>().map_err(|_| BoardError::InvalidId {
        attribute,
        value: raw.to_string(),
    })
}

fn optional_id(element: &Element, name: &'static str) -> Result<Option<i64>, BoardError> {
    match data_attr(element, name) {
        Some(raw) if !raw.trim().is_empty() => parse_id(name, &raw).map(Some),
        _ => Ok(None),
    }
}

pub fn children(element: &Element) -> Vec<Element> {
    let collection = element.children();
    (0..collection.length())
        .filter_map(|i| collection.item(i))
        .collect()
}

pub fn query_all(document: &web_sys::Document, selector: &str) -> Vec<Element> {
    let Ok(nodes) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn read_card(element: &Element) -> Result<CardView, BoardError> {
    Ok(CardView { id: optional_id(element, "id")? })
}

/// Snapshot of a `.draggable-cards` container and its children in order.
pub fn read_column_cards(container: &Element) -> Result<ColumnCards, BoardError> {
    let column_id = optional_id(container, "column-id")?.ok_or(BoardError::MissingData {
        element: CARD_CONTAINER,
        attribute: "data-column-id",
    })?;
    let cards = children(container)
        .iter()
        .map(read_card)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ColumnCards { column_id, cards })
}

pub fn read_columns(container: &Element) -> Result<Vec<ColumnView>, BoardError> {
    children(container)
        .iter()
        .map(|child| Ok(ColumnView { column_id: optional_id(child, "column-id")? }))
        .collect()
}

/// The endpoint an action button posts to.
pub fn action_url(element: &Element, name: &'static str) -> Result<String, BoardError> {
    data_attr(element, "url")
        .filter(|url| !url.is_empty())
        .ok_or(BoardError::MissingData {
            element: name,
            attribute: "data-url",
        })
}

/// A title input; its closest `<form>` carries the dirty marker.
#[derive(Debug, Clone)]
pub struct TitleInput {
    input: HtmlInputElement,
}

impl TitleInput {
    pub fn from_element(element: Element, name: &'static str) -> Result<Self, BoardError> {
        element
            .dyn_into::<HtmlInputElement>()
            .map(|input| Self { input })
            .map_err(|_| BoardError::MissingElement(name))
    }
}

impl TitleField for TitleInput {
    fn title(&self) -> String {
        self.input.value()
    }

    fn mark_clean(&self) {
        if let Ok(Some(form)) = self.input.closest("form") {
            let _ = form.class_list().remove_1(DIRTY_CLASS);
        }
    }
}

#[derive(Debug, Clone)]
pub struct LabelElement(pub Element);

impl LabelText for LabelElement {
    fn set_text(&self, text: &str) {
        self.0.set_text_content(Some(text));
    }
}

/// The pieces of one `.edit-project-board` modal.
#[derive(Debug, Clone)]
pub struct EditBoardForm {
    pub submit: Element,
    pub title: TitleInput,
    pub label: Option<LabelElement>,
}

impl EditBoardForm {
    pub fn read(modal: &Element) -> Result<Self, BoardError> {
        let submit = modal
            .query_selector(EDIT_BOARD_SUBMIT)
            .ok()
            .flatten()
            .ok_or(BoardError::MissingElement(EDIT_BOARD_SUBMIT))?;
        let title = modal
            .query_selector(EDIT_BOARD_TITLE)
            .ok()
            .flatten()
            .ok_or(BoardError::MissingElement(EDIT_BOARD_TITLE))?;
        let label = modal
            .closest(BOARD_HEADER)
            .ok()
            .flatten()
            .and_then(|header| header.query_selector(BOARD_LABEL).ok().flatten());
        Ok(Self {
            submit,
            title: TitleInput::from_element(title, EDIT_BOARD_TITLE)?,
            label: label.map(LabelElement),
        })
    }
}
