fn main() {
    dependency_updater::app::cli::run();
}
