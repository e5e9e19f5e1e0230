use iced::widget::{Space, button, column, container, image, row, text};
use iced::{Element, Length};

use besafe_core::projection::CellModel;

use crate::app::{App, Message};

const THUMB_SIZE: f32 = 160.0;
const GRID_COLUMNS: usize = 5;
const MAX_LABEL_CHARS: usize = 20;

pub fn view<'a>(app: &'a App, cells: &'a [CellModel]) -> Element<'a, Message> {
    if cells.is_empty() {
        return container(text("Nothing here yet. Add a folder or a photo.").size(16))
            .padding(40)
            .center_x(Length::Fill)
            .into();
    }

    let mut grid_rows: Vec<Element<'a, Message>> = Vec::new();
    let mut current_row: Vec<Element<'a, Message>> = Vec::new();

    for (position, cell) in cells.iter().enumerate() {
        current_row.push(cell_view(position, cell, app.thumbnail(&cell.image_storage_key)));

        if current_row.len() >= GRID_COLUMNS {
            grid_rows.push(row(std::mem::take(&mut current_row)).spacing(8).into());
        }
    }

    if !current_row.is_empty() {
        // Pad incomplete row
        while current_row.len() < GRID_COLUMNS {
            current_row.push(Space::new().width(THUMB_SIZE).into());
        }
        grid_rows.push(row(std::mem::take(&mut current_row)).spacing(8).into());
    }

    column(grid_rows).spacing(8).padding(10).into()
}

fn cell_view<'a>(
    position: usize,
    cell: &'a CellModel,
    thumbnail: Option<&'a image::Handle>,
) -> Element<'a, Message> {
    let preview: Element<'a, Message> = match thumbnail {
        Some(handle) if !cell.is_album => image(handle.clone())
            .width(THUMB_SIZE)
            .height(THUMB_SIZE)
            .into(),
        _ => {
            let placeholder = if cell.is_album { "Folder" } else { "..." };
            container(text(placeholder).size(14))
                .width(THUMB_SIZE)
                .height(THUMB_SIZE)
                .center_x(THUMB_SIZE)
                .center_y(THUMB_SIZE)
                .into()
        }
    };

    let label = cell_label(cell);
    let body = column![preview, text(label).size(11)]
        .spacing(4)
        .width(THUMB_SIZE);

    let mut actions = row![].spacing(4);
    if !cell.is_album {
        actions = actions.push(
            button(text("Edit").size(11))
                .on_press(Message::EditCell(position))
                .padding([2, 6]),
        );
    }
    actions = actions.push(
        button(text("Delete").size(11))
            .on_press(Message::DeleteCell(position))
            .padding([2, 6])
            .style(button::danger),
    );

    column![
        button(body).on_press(Message::OpenCell(position)).padding(4),
        actions,
    ]
    .spacing(4)
    .into()
}

fn cell_label(cell: &CellModel) -> String {
    let mut label = if cell.title.chars().count() > MAX_LABEL_CHARS {
        let head: String = cell.title.chars().take(MAX_LABEL_CHARS - 3).collect();
        format!("{head}...")
    } else {
        cell.title.clone()
    };
    if cell.is_favorite {
        label.push_str(" *");
    }
    label
}
