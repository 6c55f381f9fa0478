fn main() -> anyhow::Result<()> {
    rubyscope_cli::run()
}
