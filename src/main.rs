use clap::{Parser, Subcommand};
use plume::render::Renderer;
use plume::{collection, config, output, write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "plume")]
#[command(about = "Static site generator for dated blog collections")]
#[command(long_about = "\
Static site generator for dated blog collections

Your filesystem is the data source. Each _<collection> directory holds
date-prefixed content files; the date prefix and front matter drive every
document's place in the generated site.

Site structure:

  site/
  ├── config.toml                      # Site config (optional)
  ├── _posts/                          # Collection (declared in config.toml)
  │   ├── 2021-03-01-first-light.md    # date 2021-03-01, slug first-light
  │   ├── 2021-02-01-thaw.md
  │   └── 2020/                        # Subdirectories are fine
  │       └── 2020-05-01-hello.md
  └── _notes/                          # Another collection
      └── field-notes.md               # No date prefix: slug field-notes

Each file opens with a front-matter block:

  ---
  title: First Light
  categories: [photography, dawn]
  ---
  Body in markdown, with {{ page.title }} and {{ site.title }} available.

Output paths come from permalink patterns (config.toml), e.g.
/:categories/:year/:month/:day/:title/ places the first post above at
/photography/dawn/2021/03/01/first-light/.

Run 'plume gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Site root directory
    #[arg(long, default_value = ".", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Assemble all collections and report without writing anything
    Check,
    /// Assemble all collections and write the site to the output directory
    Build,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Check => {
            let site = config::load_config(&cli.source)?;
            let renderer = Renderer::new(&site);
            let assembly = collection::assemble(&cli.source, &site, &renderer)?;
            output::print_assembly_output(&assembly);
            if assembly.skipped.is_empty() {
                println!("==> Content is valid");
            } else {
                println!("==> {} document(s) skipped", assembly.skipped.len());
                std::process::exit(1);
            }
        }
        Command::Build => {
            let site = config::load_config(&cli.source)?;
            let renderer = Renderer::new(&site);

            println!("==> Assembling {}", cli.source.display());
            let assembly = collection::assemble(&cli.source, &site, &renderer)?;
            output::print_assembly_output(&assembly);

            println!("==> Writing {}", cli.output.display());
            let written = write::write_site(&assembly, &cli.output)?;

            // A human-readable snapshot of the run, for debugging and diffs.
            std::fs::create_dir_all(&cli.output)?;
            let manifest = serde_json::to_string_pretty(&assembly.collections)?;
            std::fs::write(cli.output.join("assembly.json"), manifest)?;

            println!(
                "==> Build complete: {} document(s), {} skipped",
                written,
                assembly.skipped.len()
            );
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
