fn main() {
    if let Err(err) = meshgraph::cli::run() {
        meshgraph::ui::output::error(format!("{:#}", err));
        std::process::exit(1);
    }
}
