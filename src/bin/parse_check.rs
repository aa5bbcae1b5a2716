use carnet::core::category::{default_action_templates, default_categories};
use carnet::parse::{TaskParser, neutral_title};

fn main() {
    systemd_journal_logger::JournalLog::new()
        .unwrap()
        .with_syslog_identifier("carnet-parse-check".to_string())
        .install()
        .unwrap();
    log::set_max_level(log::LevelFilter::Info);

    let input = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    if input.trim().is_empty() {
        eprintln!("usage: parse_check <free text task>");
        std::process::exit(2);
    }

    let action_catalog: Vec<String> = default_action_templates("local")
        .into_iter()
        .map(|t| t.name)
        .collect();
    let categories = default_categories("local");
    let category_catalog: Vec<String> = categories.iter().map(|c| c.name.clone()).collect();

    let parser = TaskParser::new(&action_catalog, &category_catalog);
    let parsed = parser.parse(&input);

    let resolved = parsed
        .detected_category
        .as_ref()
        .and_then(|name| categories.iter().find(|c| c.name == *name));

    println!("{}", serde_json::to_string_pretty(&parsed).expect("serializable parse"));
    println!("neutral title: {}", neutral_title(&parsed, resolved));
}
