use crate::app::{App, InputMode, Screen};
use finadvisor_core::Sender;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{
        Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap,
    },
    Frame,
};

const FEATURES: &[(&str, &str)] = &[
    (
        "Tax Optimization",
        "Get personalized tax strategies and deduction recommendations",
    ),
    (
        "Investment Analysis",
        "AI-powered portfolio analysis and investment recommendations",
    ),
    (
        "Risk Assessment",
        "Comprehensive financial risk evaluation and mitigation strategies",
    ),
    (
        "Smart Insights",
        "Advanced AI analysis of your financial patterns and opportunities",
    ),
];

const INPUT_PLACEHOLDER: &str = "Ask me about taxes, investments, loans, budgeting...";

/// Turn `**bold**` runs into styled spans; everything else renders raw.
/// Unterminated markers stay literal.
fn parse_bold_line(text: &str) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut rest = text;

    while let Some(start) = rest.find("**") {
        let after = &rest[start + 2..];
        let Some(len) = after.find("**") else {
            break;
        };
        if start > 0 {
            spans.push(Span::raw(rest[..start].to_string()));
        }
        spans.push(Span::styled(
            after[..len].to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ));
        rest = &after[len + 2..];
    }

    if !rest.is_empty() {
        spans.push(Span::raw(rest.to_string()));
    }

    Line::from(spans)
}

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    // Main layout: header, body, footer
    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(app, frame, header_area);

    match app.screen {
        Screen::Landing => render_landing_screen(frame, body_area),
        Screen::Chat => render_chat_screen(app, frame, body_area),
    }

    render_footer(app, frame, footer_area);
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let status = if app.screen == Screen::Chat {
        Span::styled(" ● AI Online ", Style::default().fg(Color::Green))
    } else {
        Span::raw(" ")
    };

    let title = Line::from(vec![
        Span::styled(" ✦ FinanceAI Pro ", Style::default().fg(Color::Cyan).bold()),
        status,
        Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::Gray),
        ),
    ]);

    let header = Paragraph::new(title).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(header, area);
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let mode_style = match app.input_mode {
        InputMode::Normal => Style::default().bg(Color::Blue).fg(Color::White),
        InputMode::Editing => Style::default().bg(Color::Yellow).fg(Color::Black),
    };

    let mode_text = match app.screen {
        Screen::Landing => " HOME ",
        Screen::Chat => " CHAT ",
    };

    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let label_style = Style::default().bg(Color::Black).fg(Color::White);

    let hints = match (app.screen, app.input_mode) {
        (Screen::Landing, _) => vec![
            Span::styled(" Enter ", key_style),
            Span::styled(" start chat ", label_style),
            Span::styled(" q ", key_style),
            Span::styled(" quit ", label_style),
        ],
        (Screen::Chat, InputMode::Editing) => vec![
            Span::styled(" Enter ", key_style),
            Span::styled(" send ", label_style),
            Span::styled(" Esc ", key_style),
            Span::styled(" scroll mode ", label_style),
        ],
        (Screen::Chat, InputMode::Normal) => vec![
            Span::styled(" i ", key_style),
            Span::styled(" write ", label_style),
            Span::styled(" j/k ", key_style),
            Span::styled(" scroll ", label_style),
            Span::styled(" g/G ", key_style),
            Span::styled(" top/bottom ", label_style),
            Span::styled(" Esc ", key_style),
            Span::styled(" back ", label_style),
        ],
    };

    let mut spans = vec![Span::styled(mode_text, mode_style), Span::raw(" ")];
    spans.extend(hints);

    let footer = Paragraph::new(Line::from(spans));
    frame.render_widget(footer, area);
}

fn render_landing_screen(frame: &mut Frame, area: Rect) {
    let [hero_area, features_area, cta_area] = Layout::vertical([
        Constraint::Length(9),
        Constraint::Min(0),
        Constraint::Length(2),
    ])
    .areas(area);

    // Hero: headline, tagline, stats
    let hero_lines = vec![
        Line::default(),
        Line::from(Span::styled(
            "Your AI-Powered",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Financial Advisor",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(Span::styled(
            "Get expert guidance on taxes, loans, investments, and financial planning.",
            Style::default().fg(Color::Gray),
        )),
        Line::from(Span::styled(
            "Our advanced AI provides personalized solutions for all your financial needs.",
            Style::default().fg(Color::Gray),
        )),
        Line::default(),
        Line::from(vec![
            Span::styled("100k+", Style::default().fg(Color::Cyan).bold()),
            Span::raw(" Questions Answered    "),
            Span::styled("$2M+", Style::default().fg(Color::Green).bold()),
            Span::raw(" Savings Generated    "),
            Span::styled("98%", Style::default().fg(Color::Cyan).bold()),
            Span::raw(" Accuracy Rate"),
        ]),
    ];

    let hero = Paragraph::new(hero_lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(hero, hero_area);

    // Feature cards, flattened into a bullet list
    let mut feature_lines = vec![Line::from(Span::styled(
        "Comprehensive Financial Solutions",
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    feature_lines.push(Line::default());
    for (title, description) in FEATURES {
        feature_lines.push(Line::from(vec![
            Span::styled("  ▪ ", Style::default().fg(Color::Cyan)),
            Span::styled(*title, Style::default().fg(Color::Cyan).bold()),
            Span::raw(": "),
            Span::styled(*description, Style::default().fg(Color::Gray)),
        ]));
        feature_lines.push(Line::default());
    }

    let features = Paragraph::new(feature_lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(features, features_area);

    let cta = Paragraph::new(Line::from(vec![
        Span::styled("Ready to transform your financial future? Press ", Style::default()),
        Span::styled(" Enter ", Style::default().bg(Color::Cyan).fg(Color::Black).bold()),
        Span::styled(" to start chatting", Style::default()),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(cta, cta_area);
}

fn render_chat_screen(app: &mut App, frame: &mut Frame, area: Rect) {
    let [chat_area, input_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(3),
    ])
    .areas(area);

    // Store chat area dimensions for scroll calculations (inner size minus borders)
    app.chat_height = chat_area.height.saturating_sub(2);
    app.chat_width = chat_area.width.saturating_sub(2);

    render_transcript(app, frame, chat_area);
    render_input(app, frame, input_area);
}

fn render_transcript(app: &mut App, frame: &mut Frame, area: Rect) {
    let chat_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if app.input_mode == InputMode::Normal {
            Color::Cyan
        } else {
            Color::DarkGray
        }))
        .title(" Advisor Chat ");

    let mut lines: Vec<Line> = Vec::new();

    for msg in app.conversation.messages() {
        let (label, label_color) = match msg.sender {
            Sender::User => ("You", Color::Cyan),
            Sender::Assistant => ("Advisor", Color::Yellow),
        };
        lines.push(Line::from(vec![
            Span::styled(
                label,
                Style::default().fg(label_color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}", msg.timestamp.format("%H:%M")),
                Style::default().fg(Color::DarkGray),
            ),
        ]));

        match msg.sender {
            Sender::User => {
                for line in msg.content.lines() {
                    lines.push(Line::from(line.to_string()));
                }
            }
            Sender::Assistant => {
                for line in msg.content.lines() {
                    lines.push(parse_bold_line(line));
                }
            }
        }
        lines.push(Line::default());
    }

    if app.conversation.is_busy() {
        lines.push(Line::from(Span::styled(
            "Advisor",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )));
        // Animated ellipsis: cycles through ".", "..", "..."
        let dots = ".".repeat((app.animation_frame as usize) + 1);
        lines.push(Line::from(Span::styled(
            format!("Typing{}", dots),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )));
    }

    app.total_chat_lines = lines.len() as u16;

    let transcript = Paragraph::new(Text::from(lines))
        .block(chat_block)
        .wrap(Wrap { trim: true })
        .scroll((app.chat_scroll, 0));
    frame.render_widget(transcript, area);

    if app.total_chat_lines > app.chat_height {
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("^"))
            .end_symbol(Some("v"));

        let mut scrollbar_state = ScrollbarState::new(app.total_chat_lines as usize)
            .position(app.chat_scroll as usize);

        frame.render_stateful_widget(
            scrollbar,
            area.inner(ratatui::layout::Margin {
                vertical: 1,
                horizontal: 0,
            }),
            &mut scrollbar_state,
        );
    }
}

fn render_input(app: &App, frame: &mut Frame, area: Rect) {
    let editing = app.input_mode == InputMode::Editing;

    let title = if app.conversation.is_busy() {
        " Message (advisor is typing) "
    } else {
        " Message "
    };

    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if editing {
            Color::Yellow
        } else {
            Color::DarkGray
        }))
        .title(title);

    let input = if app.conversation.draft().is_empty() {
        Paragraph::new(INPUT_PLACEHOLDER)
            .style(Style::default().fg(Color::DarkGray))
            .block(input_block)
    } else {
        Paragraph::new(app.conversation.draft())
            .style(Style::default().fg(Color::Cyan))
            .block(input_block)
    };

    frame.render_widget(input, area);

    // Show cursor when editing
    if editing {
        frame.set_cursor_position((area.x + app.input_cursor as u16 + 1, area.y + 1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flatten(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn bold_markers_become_styled_spans() {
        let line = parse_bold_line("pay down **high-rate** debt first");
        assert_eq!(flatten(&line), "pay down high-rate debt first");
        assert!(line
            .spans
            .iter()
            .any(|s| s.content == "high-rate" && s.style.add_modifier.contains(Modifier::BOLD)));
    }

    #[test]
    fn unterminated_bold_stays_literal() {
        let line = parse_bold_line("a ** b");
        assert_eq!(flatten(&line), "a ** b");

        let line = parse_bold_line("**leading: done");
        assert_eq!(flatten(&line), "**leading: done");
    }

    #[test]
    fn plain_text_passes_through() {
        let line = parse_bold_line("• 50/30/20 Rule");
        assert_eq!(flatten(&line), "• 50/30/20 Rule");
        assert_eq!(line.spans.len(), 1);
    }
}
