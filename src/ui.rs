//! The UI renders the outline model into a sidebar next to the cell list.
//!
//! The sidebar is a pure projection: every frame it is derived afresh from
//! the outline tree, the highlight marks, and the collapse state. Nothing
//! is read back out of the rendered widgets.

use crate::app::App;
use crate::notebook::CellKind;
use crate::sidebar::Side;
use crate::sync::EntryMark;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Renders the sidebar, the cell list, and the help bar.
pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(f.area());

    if app.sidebar.visible {
        let (toc_slot, cells_slot) = match app.sidebar.side {
            Side::Left => (0, 1),
            Side::Right => (1, 0),
        };
        let mut constraints = [Constraint::Min(0), Constraint::Min(0)];
        constraints[toc_slot] = Constraint::Length(app.sidebar.width);
        let panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(chunks[0]);
        draw_toc(f, app, panes[toc_slot]);
        draw_cells(f, app, panes[cells_slot]);
    } else {
        draw_cells(f, app, chunks[0]);
    }

    let help_text = if let Some(ref msg) = app.message {
        msg.clone()
    } else {
        "\u{2191}/\u{2193}: Navigate | Enter: Run | Space: Fold | n: Numbers | t: Sidebar | \
         c: Contents | </>: Width | r: Reload | q: Quit"
            .to_string()
    };
    let help = Paragraph::new(help_text).block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[1]);
}

fn highlight_colors(app: &App) -> (Color, Color) {
    let selected = app.cfg.selected_color.parse().unwrap_or(Color::Yellow);
    let running = app.cfg.running_color.parse().unwrap_or(Color::Red);
    (selected, running)
}

fn draw_toc(f: &mut Frame, app: &App, area: Rect) {
    let title = if app.sidebar.list_open {
        "Contents [-]"
    } else {
        "Contents [+]"
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    if !app.sidebar.list_open {
        f.render_widget(block, area);
        return;
    }

    let (selected_color, running_color) = highlight_colors(app);
    let outline = &app.controller.outline;
    let collapse = &app.controller.collapse;

    let items: Vec<ListItem> = collapse
        .visible_entries(outline)
        .into_iter()
        .map(|index| {
            let entry = outline.entry(index);
            let indent = "  ".repeat(entry.level.saturating_sub(1));
            let caret = collapse.caret(outline, index);
            let mut spans = vec![Span::raw(format!("{indent}{caret} "))];
            if app.cfg.number_sections {
                spans.push(Span::styled(
                    format!("{}\u{a0}\u{a0}", entry.label()),
                    Style::default().add_modifier(Modifier::BOLD),
                ));
            }
            spans.push(Span::raw(entry.title.clone()));

            let style = match app.controller.mark(index) {
                EntryMark::Selected | EntryMark::ExecutingSelected => {
                    Style::default().bg(selected_color).fg(Color::Black)
                }
                EntryMark::Executing => Style::default()
                    .fg(running_color)
                    .add_modifier(Modifier::BOLD),
                EntryMark::None => Style::default(),
            };
            ListItem::new(Line::from(spans)).style(style)
        })
        .collect();

    let list = List::new(items).block(block);
    f.render_widget(list, area);
}

fn draw_cells(f: &mut Frame, app: &App, area: Rect) {
    let (_, running_color) = highlight_colors(app);
    let hidden = app.hidden_cells();
    let running = app.controller.running_cells();
    let selected = app.controller.selected_cell();

    let items: Vec<ListItem> = app
        .notebook
        .cells
        .iter()
        .enumerate()
        .filter(|(index, _)| !hidden.contains(index))
        .map(|(index, cell)| {
            let marker = if running.contains(&index) { '*' } else { ' ' };
            let kind = cell.kind.to_string();
            let line = Line::from(vec![
                Span::styled(
                    format!("{marker}{kind:>4} "),
                    Style::default().fg(match cell.kind {
                        CellKind::Markdown => Color::Cyan,
                        CellKind::Code => Color::Blue,
                        CellKind::Raw => Color::DarkGray,
                    }),
                ),
                Span::raw(cell.summary().to_string()),
            ]);
            let style = if selected == Some(index) {
                Style::default().add_modifier(Modifier::REVERSED)
            } else if running.contains(&index) {
                Style::default().fg(running_color)
            } else {
                Style::default()
            };
            ListItem::new(line).style(style)
        })
        .collect();

    let title = format!(
        "{} ({} cells)",
        app.notebook.name(),
        app.notebook.cells.len()
    );
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(list, area);
}
