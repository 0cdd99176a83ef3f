use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Line as CanvasLine, Points};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap};

use crate::app::{
    App, Curator, Gate, GateStep, MarketView, OWNERS_COUNT, STAKING_APY, Stage, TOTAL_SUPPLY,
    format_percent,
};
use crate::catalog::{Chain, ChainTab};
use crate::chart;

struct Frames {
    header: Rect,
    body: Rect,
    footer: Rect,
}

fn frames(area: Rect) -> Frames {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(7),
        ])
        .split(area);
    Frames {
        header: chunks[0],
        body: chunks[1],
        footer: chunks[2],
    }
}

struct MarketPanes {
    price: Rect,
    chart: Rect,
    stats: Rect,
    position: Rect,
    composition: Rect,
}

fn market_panes(body: Rect) -> MarketPanes {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(body);
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(8),
            Constraint::Length(4),
        ])
        .split(columns[0]);
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(10), Constraint::Min(0)])
        .split(columns[1]);
    MarketPanes {
        price: left[0],
        chart: left[1],
        stats: left[2],
        position: right[0],
        composition: right[1],
    }
}

/// Drawing surface of the price chart for a terminal of the given size.
pub fn chart_area(size: Rect) -> Rect {
    let chart = market_panes(frames(size).body).chart;
    Block::default().borders(Borders::ALL).inner(chart)
}

pub fn draw(f: &mut Frame<'_>, app: &App) {
    let frames = frames(f.size());
    draw_header(f, frames.header, app);
    match &app.stage {
        Stage::Locked(gate) => draw_gate(f, frames.body, gate),
        Stage::Curating(curator) => draw_curator(f, frames.body, app, curator),
        Stage::Minted(view) => draw_market(f, frames.body, app, view),
    }
    draw_footer(f, frames.footer, app);
}

fn draw_header(f: &mut Frame<'_>, area: Rect, app: &App) {
    let mut spans = vec![
        Span::styled(
            "ThewClub",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(".packs", Style::default().fg(Color::Magenta)),
    ];
    if !matches!(app.stage, Stage::Locked(_)) {
        spans.push(Span::raw("  |  Balance "));
        spans.push(Span::styled(
            format!("{:.4} ETH", app.ledger.balance),
            Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw("  |  "));
        spans.push(Span::styled(
            "$THEWCLUBBIGGS Access",
            Style::default().fg(Color::Magenta),
        ));
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn draw_gate(f: &mut Frame<'_>, area: Rect, gate: &Gate) {
    let block = pane_block("Pack Curator", true);
    let panel = centered(area, 60, 9);
    let step_line = match gate.step {
        GateStep::Disconnected => Line::from(vec![
            Span::styled("[Enter] ", Style::default().fg(Color::Yellow)),
            Span::raw("Connect Wallet"),
        ]),
        GateStep::Connecting => Line::from(Span::styled(
            "Connecting wallet...",
            Style::default().fg(Color::Gray),
        )),
        GateStep::Connected => Line::from(vec![
            Span::styled("✓ Wallet connected  ", Style::default().fg(Color::LightGreen)),
            Span::styled("[Enter] ", Style::default().fg(Color::Yellow)),
            Span::raw("Pay access fee"),
        ]),
        GateStep::Paying => Line::from(Span::styled(
            "Confirming payment...",
            Style::default().fg(Color::Gray),
        )),
    };
    let lines = vec![
        Line::from(Span::styled(
            "Members Only",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("The Pack Curator is reserved for members only."),
        Line::from("Hold $THEWCLUBBIGGS to unlock curation."),
        Line::from(""),
        step_line,
    ];
    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, panel);
}

fn draw_curator(f: &mut Frame<'_>, area: Rect, app: &App, curator: &Curator) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);
    draw_catalog(f, columns[0], curator);
    draw_pack_status(f, columns[1], app, curator);
}

fn draw_catalog(f: &mut Frame<'_>, area: Rect, curator: &Curator) {
    let block = pane_block("Discover Assets", !curator.searching);
    f.render_widget(block.clone(), area);
    let inner = block.inner(area);
    let segments = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    let selected_tab = match curator.tab {
        ChainTab::All => 0,
        ChainTab::Only(Chain::Zora) => 1,
        ChainTab::Only(Chain::Solana) => 2,
    };
    let tabs = Tabs::new(vec!["All", "Zora", "Solana"])
        .select(selected_tab)
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(tabs, segments[0]);

    let search = if curator.searching {
        Line::from(vec![
            Span::styled("Search: ", Style::default().fg(Color::Yellow)),
            Span::raw(format!("{}▏", curator.query)),
        ])
    } else if curator.query.is_empty() {
        Line::from(Span::styled(
            "/ search by name or ticker",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(vec![
            Span::styled("Search: ", Style::default().fg(Color::Gray)),
            Span::raw(curator.query.clone()),
        ])
    };
    f.render_widget(Paragraph::new(search), segments[1]);

    let visible = curator.visible();
    if visible.is_empty() {
        let paragraph = Paragraph::new("No coins found matching your criteria.")
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, segments[2]);
        return;
    }

    let items: Vec<ListItem> = visible
        .iter()
        .map(|coin| {
            let picked = curator.is_selected(coin);
            let marker = if picked { "[x]" } else { "[ ]" };
            let line = Line::from(vec![
                Span::styled(
                    format!("{marker} "),
                    Style::default().fg(if picked {
                        Color::LightGreen
                    } else {
                        Color::DarkGray
                    }),
                ),
                Span::styled(
                    format!("{:<18}", coin.name),
                    Style::default().fg(Color::White),
                ),
                Span::styled(
                    format!("{:<8}", coin.ticker),
                    Style::default().fg(Color::LightCyan),
                ),
                Span::styled(format!("{:<7}", coin.chain), chain_style(coin.chain)),
                Span::raw(format!("{:>10.4}", coin.price)),
                Span::styled(
                    format!("  by {}", coin.creator),
                    Style::default().fg(Color::Gray),
                ),
            ]);
            ListItem::new(line)
        })
        .collect();

    let list = List::new(items).highlight_style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );
    let mut state = ListState::default();
    state.select(Some(curator.cursor.min(visible.len() - 1)));
    f.render_stateful_widget(list, segments[2], &mut state);
}

fn draw_pack_status(f: &mut Frame<'_>, area: Rect, app: &App, curator: &Curator) {
    let block = pane_block("Your Pack", false);
    f.render_widget(block.clone(), area);
    let inner = block.inner(area);
    let segments = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(8)])
        .split(inner);

    let config = &app.config;
    let count = curator.selected.len();
    let valid = (config.min_pack_size..=config.max_pack_size).contains(&count);
    let mut lines = vec![Line::from(Span::styled(
        format!("{} / {} items", count, config.max_pack_size),
        Style::default().fg(if valid {
            Color::LightGreen
        } else {
            Color::LightRed
        }),
    ))];
    if curator.selected.is_empty() {
        lines.push(Line::from(Span::styled(
            "Select coins to build your pack.",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for coin in &curator.selected {
        lines.push(Line::from(vec![
            Span::raw(format!("• {} ", coin.name)),
            Span::styled(coin.ticker, Style::default().fg(Color::Gray)),
        ]));
    }
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), segments[0]);

    let affordable = app.ledger.balance >= config.mint_cost;
    let action = if curator.minting.is_some() {
        Span::styled(
            "AI Minting...",
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )
    } else if !affordable {
        Span::styled("Insufficient Funds", Style::default().fg(Color::LightRed))
    } else if valid {
        Span::styled(
            "[M] Mint Pack",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled("[M] Mint Pack", Style::default().fg(Color::DarkGray))
    };
    let mut summary = vec![
        Line::from(format!("Pack Base Fee       {} ETH", config.mint_cost)),
        Line::from("Curator Fee ($THEWCLUBBIGGS)  Free"),
        Line::from(format!("Total               {} ETH", config.mint_cost)),
        Line::from(format!("Balance             {:.4} ETH", app.ledger.balance)),
        Line::from(""),
        Line::from(action),
    ];
    if !valid && count > 0 {
        summary.push(Line::from(Span::styled(
            format!(
                "Must select between {} and {} coins.",
                config.min_pack_size, config.max_pack_size
            ),
            Style::default().fg(Color::LightRed),
        )));
    }
    f.render_widget(Paragraph::new(summary), segments[1]);
}

fn draw_market(f: &mut Frame<'_>, area: Rect, app: &App, view: &MarketView) {
    let panes = market_panes(area);
    let change = view.percent_change();
    let palette = TrendPalette::for_change(change);

    draw_price_header(f, panes.price, view, palette.line, change);
    draw_chart(f, panes.chart, view, palette);
    draw_stats(f, panes.stats, view);
    draw_position(f, panes.position, app, view);
    draw_composition(f, panes.composition, view);

    if view.share_open {
        draw_share(f, area, view);
    }
}

fn draw_price_header(f: &mut Frame<'_>, area: Rect, view: &MarketView, trend: Color, change: f64) {
    let live = if view.simulation_active() {
        Span::styled(" LIVE ", Style::default().fg(Color::Black).bg(Color::LightGreen))
    } else {
        Span::styled(" PAUSED ", Style::default().fg(Color::Black).bg(Color::Gray))
    };
    let lines = vec![
        Line::from(vec![
            Span::styled(
                view.pack.name.clone(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled("PACK", Style::default().fg(Color::Magenta)),
            Span::raw("  "),
            live,
        ]),
        Line::from(vec![
            Span::styled(
                format!("{:.4} ETH", view.price()),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(format_percent(change), Style::default().fg(trend)),
        ]),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta));
    f.render_widget(Paragraph::new(lines).block(block), area);
}

/// Line and area colours for a rising or falling series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TrendPalette {
    line: Color,
    fill: Color,
}

impl TrendPalette {
    fn for_change(change: f64) -> Self {
        if change >= 0.0 {
            Self {
                line: Color::LightGreen,
                fill: Color::Green,
            }
        } else {
            Self {
                line: Color::LightRed,
                fill: Color::Red,
            }
        }
    }
}

fn draw_chart(f: &mut Frame<'_>, area: Rect, view: &MarketView, palette: TrendPalette) {
    let block = Block::default()
        .title("Price")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    let outline = chart::build_outline(&view.points);
    let hover = view.hover.state();
    let TrendPalette {
        line: trend,
        fill: fill_color,
    } = palette;

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([0.0, 100.0])
        .y_bounds([0.0, 100.0])
        .paint(move |ctx| {
            let mut x = 0.0;
            while x <= 100.0 {
                if let Some(y) = chart::interpolate_y(&outline.fill, x) {
                    ctx.draw(&CanvasLine {
                        x1: x,
                        y1: 0.0,
                        x2: x,
                        y2: chart::BASELINE - y,
                        color: fill_color,
                    });
                }
                x += 2.0;
            }
            ctx.layer();
            for pair in outline.line.windows(2) {
                ctx.draw(&CanvasLine {
                    x1: pair[0].0,
                    y1: chart::BASELINE - pair[0].1,
                    x2: pair[1].0,
                    y2: chart::BASELINE - pair[1].1,
                    color: trend,
                });
            }
            if let Some(h) = hover {
                let mut y = 0.0;
                while y <= 100.0 {
                    ctx.draw(&CanvasLine {
                        x1: h.x,
                        y1: y,
                        x2: h.x,
                        y2: (y + 4.0).min(100.0),
                        color: Color::DarkGray,
                    });
                    y += 8.0;
                }
                ctx.draw(&Points {
                    coords: &[(h.x, chart::BASELINE - h.y)],
                    color: Color::White,
                });
            }
        });
    f.render_widget(canvas, area);

    if let Some(h) = hover {
        draw_tooltip(f, inner, h);
    }
}

fn draw_tooltip(f: &mut Frame<'_>, plot: Rect, hover: chart::HoverState) {
    let text = format!("{:.4} ETH  #{}", hover.value, hover.index);
    let width = (text.chars().count() as u16 + 2).min(plot.width);
    let height = 3u16.min(plot.height);
    if width == 0 || height == 0 {
        return;
    }
    let anchor_x = plot.x + (hover.x / 100.0 * plot.width.saturating_sub(1) as f64).round() as u16;
    let anchor_y = plot.y + (hover.y / 100.0 * plot.height.saturating_sub(1) as f64).round() as u16;
    let x = anchor_x
        .saturating_sub(width / 2)
        .clamp(plot.x, plot.x + plot.width - width);
    let y = anchor_y
        .saturating_sub(height)
        .clamp(plot.y, plot.y + plot.height - height);
    let area = Rect::new(x, y, width, height);
    let tooltip = Paragraph::new(Span::styled(
        text,
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    ))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Gray)),
    );
    f.render_widget(Clear, area);
    f.render_widget(tooltip, area);
}

fn draw_stats(f: &mut Frame<'_>, area: Rect, view: &MarketView) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let lines = vec![
        Line::from(vec![
            Span::styled("Supply ", Style::default().fg(Color::Gray)),
            Span::raw(format!("{TOTAL_SUPPLY}")),
            Span::raw("  |  "),
            Span::styled("Owners ", Style::default().fg(Color::Gray)),
            Span::raw(format!("{OWNERS_COUNT}")),
            Span::raw("  |  "),
            Span::styled("USD ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("${:.2}", view.usd_value()),
                Style::default().fg(Color::LightGreen),
            ),
        ]),
        Line::from(vec![
            Span::styled("24h Volume ", Style::default().fg(Color::Gray)),
            Span::raw(format!("{:.2} ETH", view.daily_volume())),
            Span::raw("  |  "),
            Span::styled("Hold ", Style::default().fg(Color::Gray)),
            Span::styled(view.hold_time.clone(), Style::default().fg(Color::LightGreen)),
        ]),
    ];
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_position(f: &mut Frame<'_>, area: Rect, app: &App, view: &MarketView) {
    let block = pane_block("Holdings & Staking", true);
    let lines = vec![
        Line::from(vec![
            Span::styled("Balance ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{:.4} ETH", app.ledger.balance),
                Style::default().fg(Color::LightCyan),
            ),
        ]),
        Line::from(vec![
            Span::styled("Holdings ", Style::default().fg(Color::Gray)),
            Span::raw(format!("{} PACKS", view.holdings)),
            Span::styled(
                format!("  ≈ {:.4} ETH", view.holdings_value()),
                Style::default().fg(Color::Gray),
            ),
        ]),
        Line::from(vec![
            Span::styled("Staked ", Style::default().fg(Color::Gray)),
            Span::raw(format!("{} PACKS", view.staked)),
            Span::styled(
                format!("  APY {STAKING_APY}%"),
                Style::default().fg(Color::LightGreen),
            ),
        ]),
        Line::from(vec![
            Span::styled("Est. Daily Rewards ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{:.6} ETH", view.daily_rewards()),
                Style::default().fg(Color::LightGreen),
            ),
        ]),
        Line::from(""),
        Line::from("[B] buy  [S] sell  [K] stake  [U] unstake"),
        Line::from("[Space] pause/resume  [H] share  [Esc] back"),
    ];
    f.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: true }), area);
}

fn draw_composition(f: &mut Frame<'_>, area: Rect, view: &MarketView) {
    let block = pane_block("Pack Composition", false);
    let pack = &view.pack;
    let mut lines: Vec<Line> = pack
        .coins
        .iter()
        .map(|coin| {
            Line::from(vec![
                Span::styled(format!("{:<7}", coin.chain), chain_style(coin.chain)),
                Span::raw(format!("{} ", coin.name)),
                Span::styled(coin.ticker, Style::default().fg(Color::Gray)),
            ])
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Creator ", Style::default().fg(Color::Gray)),
        Span::raw(pack.owner.clone()),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Minted ", Style::default().fg(Color::Gray)),
        Span::raw(
            pack.created_at
                .with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
        ),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Tx ", Style::default().fg(Color::Gray)),
        Span::raw(pack.short_tx_hash()),
    ]));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        pack.description.clone(),
        Style::default().fg(Color::White),
    )));
    lines.push(Line::from(Span::styled(
        format!("\"{}\"", pack.lore),
        Style::default()
            .fg(Color::Gray)
            .add_modifier(Modifier::ITALIC),
    )));
    f.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: true }), area);
}

fn draw_share(f: &mut Frame<'_>, area: Rect, view: &MarketView) {
    let panel = centered(area, 56, 8);
    let lines = vec![
        Line::from(vec![
            Span::raw("Share "),
            Span::styled(
                view.pack.name.clone(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" with your network."),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            view.pack.short_share_link(),
            Style::default().fg(Color::Magenta),
        )),
        Line::from(""),
        Line::from("[C] copy link  [Esc] done"),
    ];
    f.render_widget(Clear, panel);
    f.render_widget(
        Paragraph::new(lines)
            .block(pane_block("Share Pack", true))
            .wrap(Wrap { trim: true }),
        panel,
    );
}

fn draw_footer(f: &mut Frame<'_>, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Ops & Feed")
        .border_style(Style::default().fg(Color::Gray));
    f.render_widget(block.clone(), area);
    let inner = block.inner(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);

    let mut instruction_lines = vec![Line::from("Q quit | W withdraw")];
    match &app.stage {
        Stage::Locked(_) => instruction_lines.push(Line::from("Enter connect / pay")),
        Stage::Curating(_) => {
            instruction_lines.push(Line::from("↑↓ browse  Enter/Space toggle  Tab chain"));
            instruction_lines.push(Line::from("/ search  M mint"));
        }
        Stage::Minted(_) => {
            instruction_lines.push(Line::from("B buy  S sell  K stake  U unstake"));
            instruction_lines.push(Line::from("Space sim  H share  Esc back  mouse: hover chart"));
        }
    }
    let instruction = Paragraph::new(instruction_lines).wrap(Wrap { trim: true });
    f.render_widget(instruction, columns[0]);

    let mut message_lines: Vec<Line> = app
        .messages
        .iter()
        .map(|msg| Line::from(Span::raw(msg.clone())))
        .collect();
    if message_lines.is_empty() {
        message_lines.push(Line::from(Span::styled(
            "Awaiting signal...",
            Style::default().fg(Color::DarkGray),
        )));
    }
    let feed = Paragraph::new(message_lines).wrap(Wrap { trim: true });
    f.render_widget(feed, columns[1]);
}

fn chain_style(chain: Chain) -> Style {
    match chain {
        Chain::Zora => Style::default().fg(Color::LightBlue),
        Chain::Solana => Style::default().fg(Color::LightGreen),
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn pane_block<'a>(title: &'a str, focused: bool) -> Block<'a> {
    let border_style = if focused {
        Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    Block::default()
        .title(Span::styled(title, Style::default().fg(Color::White)))
        .borders(Borders::ALL)
        .border_style(border_style)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_area_sits_inside_terminal() {
        let size = Rect::new(0, 0, 120, 40);
        let plot = chart_area(size);
        assert!(plot.width > 0 && plot.height > 0);
        assert!(plot.right() <= size.right());
        assert!(plot.bottom() <= size.bottom());
        assert!(plot.y > 3);
    }

    #[test]
    fn centered_clamps_to_area() {
        let area = Rect::new(2, 2, 10, 4);
        assert_eq!(centered(area, 20, 20), area);
        assert_eq!(centered(area, 4, 2), Rect::new(5, 3, 4, 2));
    }

    #[test]
    fn palette_follows_direction_of_change() {
        let up = TrendPalette::for_change(0.0);
        assert_eq!((up.line, up.fill), (Color::LightGreen, Color::Green));
        let down = TrendPalette::for_change(-0.5);
        assert_eq!((down.line, down.fill), (Color::LightRed, Color::Red));
    }
}
