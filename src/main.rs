fn main() {
    woopy::app::cli::run();
}
