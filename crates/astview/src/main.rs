use anyhow::Context;
use astview_errors::Renderer;
use astview_ide::{Config, ReparsePolicy, TreeAdapter};
use astview_lsp_server::Server;
use camino::Utf8PathBuf;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Syntax tree view for TypeScript and JavaScript")]
enum Options {
    /// Run the language server over stdio.
    Server {
        #[arg(long, default_value = "typescript")]
        compiler: String,
        #[arg(long, default_value_t = ReparsePolicy::Incremental)]
        reparse: ReparsePolicy,
    },
    /// Print the syntax tree of a file.
    Dump {
        path: Utf8PathBuf,
        #[arg(long, default_value = "typescript")]
        compiler: String,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("ASTVIEW_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match Options::parse() {
        Options::Server { compiler, reparse } => {
            tracing::info!(%compiler, %reparse, "starting language server");
            Server::stdio(Config { compiler, reparse })?.run()
        }
        Options::Dump { path, compiler } => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read `{path}`"))?;
            let compiler = astview_compiler::resolve(&compiler)?;

            let mut tree = TreeAdapter::new(compiler);
            tree.parse(&text, &path);
            print!("{}", tree.dump(&text));

            let renderer = Renderer::styled();
            for diagnostic in tree.syntax_errors() {
                eprintln!("{}", diagnostic.render(&renderer, path.as_str(), &text));
            }

            Ok(())
        }
    }
}
