use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::pointing::azimuth_to_cardinal;
use crate::{AppState, InputField, INVALID_INPUT};

pub fn draw_ui(f: &mut Frame, app_state: &AppState) {
    let show_compass = app_state.config.display.show_compass;

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(4), // Header
            Constraint::Min(14),   // Body
            Constraint::Length(3), // Footer
        ])
        .split(f.area());

    draw_header(f, rows[0], app_state);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40), // Satellite list
            Constraint::Percentage(60), // Form, results, compass
        ])
        .split(rows[1]);

    draw_satellite_list(f, body[0], app_state);

    let right_chunks = if show_compass {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Coordinate form
                Constraint::Length(8), // Results
                Constraint::Min(8),    // Compass
            ])
            .split(body[1])
    } else {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(8)])
            .split(body[1])
    };

    draw_coordinate_form(f, right_chunks[0], app_state);
    draw_results(f, right_chunks[1], app_state);
    if show_compass {
        draw_compass(f, right_chunks[2], app_state);
    }

    draw_footer(f, rows[2]);
}

fn draw_header(f: &mut Frame, area: Rect, app_state: &AppState) {
    let header_text = vec![
        Line::from(vec![
            Span::styled("Station: ", Style::default().fg(Color::Cyan)),
            Span::raw(format!("{} ", app_state.station_name)),
            Span::styled("Location: ", Style::default().fg(Color::Cyan)),
            Span::raw(format!(
                "{}°, {}°",
                app_state.latitude_input, app_state.longitude_input
            )),
        ]),
        Line::from(vec![
            Span::styled("Catalog: ", Style::default().fg(Color::Cyan)),
            Span::raw(format!("{} satellites", app_state.catalog.len())),
        ]),
    ];

    let header = Paragraph::new(header_text).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Dishaim")
            .style(Style::default().fg(Color::White)),
    );

    f.render_widget(header, area);
}

fn draw_satellite_list(f: &mut Frame, area: Rect, app_state: &AppState) {
    let header = Row::new(vec!["Satellite", "Orbit"]).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let rows = app_state
        .catalog
        .entries()
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            let style = if idx == app_state.selected_satellite {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let marker = if idx == app_state.selected_satellite {
                "> "
            } else {
                "  "
            };

            Row::new(vec![
                Cell::from(format!("{}{}", marker, entry.name)),
                Cell::from(entry.descriptor.clone()),
            ])
            .style(style)
        })
        .collect::<Vec<_>>();

    let table = Table::new(rows, [Constraint::Min(20), Constraint::Length(8)])
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Satellites (↑/↓)")
                .style(Style::default().fg(Color::White)),
        );

    f.render_widget(table, area);
}

fn draw_coordinate_form(f: &mut Frame, area: Rect, app_state: &AppState) {
    let fields = [
        (InputField::Latitude, &app_state.latitude_input),
        (InputField::Longitude, &app_state.longitude_input),
    ];

    let field_lines: Vec<Line> = fields
        .iter()
        .map(|(field, value)| {
            let is_current = *field == app_state.focused_field;
            let label_style = if is_current {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Yellow)
            };
            let indicator = if is_current { "> " } else { "  " };
            let cursor = if is_current { "|" } else { "" };

            Line::from(vec![
                Span::styled(indicator, label_style),
                Span::styled(format!("{:18}", field.label()), label_style),
                Span::raw(": "),
                Span::styled(format!("{}{}", value, cursor), Style::default().fg(Color::White)),
            ])
        })
        .collect();

    let form = Paragraph::new(field_lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Coordinates (Tab to switch)")
            .style(Style::default().fg(Color::White)),
    );

    f.render_widget(form, area);
}

fn draw_results(f: &mut Frame, area: Rect, app_state: &AppState) {
    let Some(result) = &app_state.result else {
        let invalid = Paragraph::new(INVALID_INPUT)
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Results")
                    .style(Style::default().fg(Color::White)),
            );
        f.render_widget(invalid, area);
        return;
    };

    let label = |text: &'static str| Span::styled(text, Style::default().fg(Color::Cyan));
    let value = |text: String| {
        Span::styled(
            text,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
    };

    let lines = vec![
        Line::from(vec![label("Orbital Longitude:  "), value(result.orbital_longitude.clone())]),
        Line::from(vec![label("Elevation Angle:    "), value(result.elevation.clone())]),
        Line::from(vec![
            label("Azimuth Angle:      "),
            value(result.azimuth.clone()),
            Span::raw(format!(" ({})", azimuth_to_cardinal(result.azimuth_value))),
        ]),
        Line::from(vec![label("Polarization Angle: "), value(result.polarization.clone())]),
        Line::from(vec![
            label("Slant Range:        "),
            value(format!("{:.0} km", result.slant_range_km)),
        ]),
    ];

    let results = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Results: {}", result.satellite))
            .style(Style::default().fg(Color::White)),
    );

    f.render_widget(results, area);
}

fn draw_compass(f: &mut Frame, area: Rect, app_state: &AppState) {
    use ratatui::symbols;
    use ratatui::widgets::canvas::{Canvas, Circle, Line as CanvasLine};

    let canvas = Canvas::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Antenna direction")
                .style(Style::default().fg(Color::White)),
        )
        .x_bounds([-1.2, 1.2])
        .y_bounds([-1.2, 1.2])
        .marker(symbols::Marker::Braille)
        .paint(|ctx| {
            ctx.draw(&Circle {
                x: 0.0,
                y: 0.0,
                radius: 1.0,
                color: Color::White,
            });

            // N-S and E-W axes
            ctx.draw(&CanvasLine {
                x1: 0.0,
                y1: -1.0,
                x2: 0.0,
                y2: 1.0,
                color: Color::DarkGray,
            });
            ctx.draw(&CanvasLine {
                x1: -1.0,
                y1: 0.0,
                x2: 1.0,
                y2: 0.0,
                color: Color::DarkGray,
            });

            if let Some(result) = &app_state.result {
                // Azimuth: 0° = North (up), clockwise
                let (x, y) = needle_tip(result.azimuth_value);
                ctx.draw(&CanvasLine {
                    x1: 0.0,
                    y1: 0.0,
                    x2: x,
                    y2: y,
                    color: Color::Cyan,
                });
                ctx.print(x, y, "●");
            }

            ctx.print(0.0, 1.05, "N");
            ctx.print(1.05, 0.0, "E");
            ctx.print(0.0, -1.05, "S");
            ctx.print(-1.05, 0.0, "W");
        });

    f.render_widget(canvas, area);
}

/// Canvas position of the compass needle tip for `azimuth` degrees.
fn needle_tip(azimuth: f64) -> (f64, f64) {
    let azimuth_rad = azimuth.to_radians();
    (0.9 * azimuth_rad.sin(), 0.9 * azimuth_rad.cos())
}

fn draw_footer(f: &mut Frame, area: Rect) {
    let footer = Paragraph::new(
        "↑/↓ or j/k: Select | Tab: Switch field | 0-9 . -: Edit | Backspace: Delete | q/ESC: Quit",
    )
    .style(Style::default().fg(Color::Gray))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));

    f.render_widget(footer, area);
}
