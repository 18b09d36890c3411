// src/bin/dashboard.rs
//
// Renders the dashboard in the terminal.
//
//   dashboard [PAGE] [--open ROW | --company ROW]
//
// ROW is 1-based within the shown page of the contract table.
use anyhow::{anyhow, bail, Context};
use chrono::Utc;
use defense_tech_tracker::config::Config;
use defense_tech_tracker::services::api::ApiClient;
use defense_tech_tracker::services::formatting::{format_currency, format_date_long};
use defense_tech_tracker::services::normalize::company_details_from_value;
use defense_tech_tracker::services::pages::{fetch_dashboard, LOADING_DASHBOARD};
use defense_tech_tracker::views::contract_modal::ContractModalView;
use defense_tech_tracker::views::contract_table::{TableEffect, TableEvent};
use defense_tech_tracker::views::dashboard::{DashboardData, DashboardView};
use defense_tech_tracker::views::PageState;
use dotenv::dotenv;
use log::info;
use std::env;

struct Args {
    page: usize,
    row_event: Option<TableEvent>,
}

fn parse_row(value: Option<String>, flag: &str) -> anyhow::Result<usize> {
    let row: usize = value
        .with_context(|| format!("{} needs a row number", flag))?
        .parse()
        .with_context(|| format!("{} needs a row number", flag))?;
    if row == 0 {
        bail!("rows are numbered from 1");
    }
    Ok(row - 1)
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = Args { page: 1, row_event: None };
    let mut iter = env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--open" => args.row_event = Some(TableEvent::OpenContract(parse_row(iter.next(), "--open")?)),
            "--company" => args.row_event = Some(TableEvent::SelectCompany(parse_row(iter.next(), "--company")?)),
            other => {
                args.page = other.parse().with_context(|| format!("unexpected argument {:?}", other))?;
            }
        }
    }
    Ok(args)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let args = parse_args()?;
    let config = Config::from_env()?;
    let client = ApiClient::from_config(&config).map_err(|e| anyhow!("Failed to build API client: {}", e))?;

    print!("{}", PageState::<DashboardView>::loading(LOADING_DASHBOARD));

    let data: DashboardData = match fetch_dashboard(&client).await {
        PageState::Ready { view } => view,
        other => {
            print!("{}", other.map(|_| String::new()));
            return Ok(());
        }
    };

    let mut table = DashboardView::contract_table(&data);
    table.handle(TableEvent::GoToPage(args.page));
    let effect = args.row_event.and_then(|event| table.handle(event));

    print!("{}", DashboardView::new(&data, &table, Utc::now()));

    match effect {
        Some(TableEffect::ContractOpened(contract)) => {
            println!();
            print!("{}", ContractModalView::from(&contract));
        }
        Some(TableEffect::CompanySelected(name)) => {
            info!("Fetching details for {}", name);
            let details = client.get_company_details(&name).await;
            println!();
            match details.into_data() {
                Some(body) => {
                    let details = company_details_from_value(&body);
                    let company = &details.company;
                    println!("COMPANY: {}", company.name);
                    println!("  Contracts:   {}", company.total_contracts);
                    println!("  Total Value: {}", format_currency(company.total_contract_value));
                    println!("  Avg Value:   {}", format_currency(company.avg_contract_value));
                    println!("  Agencies:    {}", company.num_agencies);
                    println!("  Latest:      {}", format_date_long(&company.latest_contract_date));
                    println!("  Listed:      {} contracts", details.contracts.len());
                }
                None => println!("Company profile for \"{}\" is unavailable.", name),
            }
        }
        None => {
            if args.row_event.is_some() {
                println!("No such row on page {}.", table.pagination().current_page);
            }
        }
    }

    Ok(())
}
