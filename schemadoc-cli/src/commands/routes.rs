use colored::Colorize;
use schemadoc_core::{Route, RouteTable};

fn method_label(method: &str) -> String {
    let padded = format!("{method:<8}");
    match method {
        "GET" => padded.green(),
        "POST" => padded.blue(),
        "PUT" => padded.yellow(),
        "DELETE" => padded.red(),
        "PATCH" => padded.magenta(),
        _ => padded.normal(),
    }
    .to_string()
}

fn route_line(route: &Route, method: &str) -> String {
    let meta = route.meta();
    let mut line = format!(
        "  {} {:<35} {}",
        method_label(method),
        route.openapi_path(),
        route.endpoint()
    );
    if !meta.responses.is_empty() {
        let statuses: Vec<&str> = meta.responses.keys().map(String::as_str).collect();
        line.push_str(&format!(" [{}]", statuses.join(", ")).dimmed().to_string());
    }
    if meta.is_hidden() {
        line.push_str(&format!(" {}", "(hidden)".dimmed()));
    }
    line
}

/// Render one line per documented verb of every route, in registration order.
pub fn render_routes(routes: &RouteTable) -> Vec<String> {
    routes
        .iter()
        .flat_map(|route| {
            route
                .documented_methods()
                .map(move |method| route_line(route, method.as_str()))
        })
        .collect()
}

/// Run the `routes` command.
pub fn run_routes(routes: &RouteTable) {
    let lines = render_routes(routes);
    if lines.is_empty() {
        println!("{}", "No routes found.".dimmed());
        return;
    }

    println!("{}", "Documented routes:".bold());
    println!();
    println!(
        "  {:<8} {:<35} {}",
        "METHOD".dimmed(),
        "PATH".dimmed(),
        "ENDPOINT".dimmed()
    );
    println!("  {}", "-".repeat(70).dimmed());
    for line in lines {
        println!("{line}");
    }
}
