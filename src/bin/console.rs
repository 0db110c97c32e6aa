// src/bin/console.rs
//
// Konsolowa wersja tabeli planet: filtr i paginacja z linii poleceń.

use std::sync::Arc;

use dotenvy::dotenv;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use planets_grid::config::AppConfig;
use planets_grid::data_provider::SwapiDataProvider;
use planets_grid::filter_state::FilterState;
use planets_grid::grid::{GridController, GridSnapshot};
use planets_grid::models::{GridResult, PLANET_COLUMNS};
use planets_grid::pagination::PageLinks;
use planets_grid::swapi::SwapiClient;

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Filter(String),
    Page(u64),
    Refresh,
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    let (verb, rest) = line.split_once(' ').unwrap_or((line, ""));
    match verb {
        "filter" | "f" => Some(Command::Filter(rest.trim().to_string())),
        "page" | "p" => rest.trim().parse().ok().filter(|n| *n > 0).map(Command::Page),
        "refresh" | "r" => Some(Command::Refresh),
        "quit" | "q" | "exit" => Some(Command::Quit),
        _ => None,
    }
}

fn render_table(result: &GridResult) -> String {
    let mut out = String::new();
    let header: Vec<String> = PLANET_COLUMNS
        .iter()
        .map(|column| format!("{:<24}", column.title))
        .collect();
    out.push_str(&format!("{:>3}  {}\n", "#", header.join("")));

    if result.rows.is_empty() {
        out.push_str("     No planets found.\n");
    }
    for row in &result.rows {
        let cells: Vec<String> = PLANET_COLUMNS
            .iter()
            .map(|column| format!("{:<24}", row.cell_text(column.id)))
            .collect();
        out.push_str(&format!(
            "{:>3}  {}\n",
            row.id().unwrap_or_default(),
            cells.join("")
        ));
    }

    let links = PageLinks::from_paginator(&result.paginator);
    out.push_str(&format!(
        "page {} of {} ({} planets)\n",
        links.current_page, links.total_pages, result.paginator.total_count
    ));
    out
}

fn render_snapshot(snapshot: &GridSnapshot) -> Option<String> {
    match snapshot.result.as_ref()? {
        Ok(result) => Some(render_table(result)),
        Err(message) => Some(format!("error: {}\n", message)),
    }
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "planets_grid=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Niepoprawna konfiguracja: {}", e);
            std::process::exit(1);
        }
    };

    let provider = Arc::new(SwapiDataProvider::new(SwapiClient::new(
        config.swapi_planets_url.clone(),
    )));
    let filters = FilterState::new();
    let controller = Arc::new(GridController::new(provider, filters.clone()));
    let _filter_reload = controller.spawn_filter_reload();

    // Drukuje każdy zastosowany wynik
    let mut snapshots = controller.subscribe();
    let printer = tokio::spawn(async move {
        while snapshots.changed().await.is_ok() {
            let rendered = render_snapshot(&snapshots.borrow_and_update());
            if let Some(rendered) = rendered {
                println!("{rendered}");
            }
        }
    });

    println!("commands: filter <name>, page <n>, refresh, quit");
    if let Err(e) = controller.go_to_page(1).await {
        tracing::warn!("Pierwsze ładowanie nieudane: {}", e);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::error!("Błąd odczytu wejścia: {}", e);
                break;
            }
        };

        let outcome = match parse_command(&line) {
            Some(Command::Filter(value)) => {
                filters.commit("name", &value);
                continue;
            }
            Some(Command::Page(page)) => controller.go_to_page(page).await,
            Some(Command::Refresh) => controller.refresh_state_force().await,
            Some(Command::Quit) => break,
            None => {
                println!("unknown command: {}", line.trim());
                continue;
            }
        };
        if let Err(e) = outcome {
            tracing::warn!("Ładowanie nieudane: {}", e);
        }
    }

    drop(controller);
    printer.abort();
}
