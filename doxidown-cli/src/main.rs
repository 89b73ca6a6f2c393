// Command-line interface for doxidown
//
// This binary converts a directory of Doxygen-generated XML into Markdown
// (MDX-safe) or HTML documentation pages, one page per compound.
//
// Usage:
//  doxidown <xml-dir> [--output <dir>]                 - Convert (default subcommand)
//  doxidown convert <xml-dir> [--output <dir>]         - Same as above (explicit)
//    --flavor <markdown|html>                          - Output flavor
//    --config <path>                                   - doxidown.toml configuration file
//    --suggest-todos                                   - Placeholder text for missing docs
//    --manifest                                        - Also write a manifest.json page listing
//
// Compound files are parsed strictly in index order; the member-kind
// back-fill and hierarchy passes run once after the last file. A grammar
// violation in any file aborts the whole run: partial output would have
// broken cross-references.

use clap::{Arg, ArgAction, Command, ValueHint};
use doxidown_config::{DoxidownConfig, Loader, OutputFlavor};
use doxidown_core::parse::doxyfile::{parse_doxyfile, Doxyfile};
use doxidown_core::parse::{compound, index};
use doxidown_core::render::{
    CompoundSummary, MapLookup, MapResolver, NullLookup, NullResolver, RenderOptions,
};
use doxidown_core::{render_compound_page, OutputMode, ParseSession, RenderContext};
use std::fs;
use std::path::Path;

fn build_cli() -> Command {
    Command::new("doxidown")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert Doxygen XML output into Markdown or HTML pages")
        .long_about(
            "doxidown reads the XML tree Doxygen generates (index.xml plus one\n\
            <refid>.xml per compound) and writes one documentation page per\n\
            compound, ready for a static-site generator.\n\n\
            Examples:\n  \
            doxidown build/xml                          # Markdown pages into ./docs\n  \
            doxidown build/xml -o site/api              # Choose the output directory\n  \
            doxidown build/xml --flavor html            # Legacy HTML flavor\n  \
            doxidown build/xml --config doxidown.toml   # Layer a config file",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a doxidown.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Enable debug logging")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert a Doxygen XML directory into documentation pages")
                .arg(
                    Arg::new("input")
                        .help("Directory containing index.xml and the compound files")
                        .required(true)
                        .value_hint(ValueHint::DirPath),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_name("DIR")
                        .help("Output directory for generated pages (default: ./docs)")
                        .value_hint(ValueHint::DirPath),
                )
                .arg(
                    Arg::new("flavor")
                        .long("flavor")
                        .value_name("FLAVOR")
                        .help("Output flavor: markdown (default) or html"),
                )
                .arg(
                    Arg::new("base-url")
                        .long("base-url")
                        .value_name("PREFIX")
                        .help("URL prefix for generated permalinks"),
                )
                .arg(
                    Arg::new("suggest-todos")
                        .long("suggest-todos")
                        .help("Emit TODO placeholders where descriptions are missing")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("manifest")
                        .long("manifest")
                        .help("Also write manifest.json listing every generated page")
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    // If the first argument looks like a path, inject "convert"
    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&args) {
        Ok(m) => m,
        Err(e) => {
            if args.len() > 1
                && !args[1].starts_with('-')
                && args[1] != "convert"
                && args[1] != "help"
            {
                let mut new_args = vec![args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&args[1..]);
                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    init_logging(matches.get_flag("verbose"));

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let config = load_cli_config(
                matches.get_one::<String>("config").map(|s| s.as_str()),
                sub_matches,
            );
            let output = sub_matches
                .get_one::<String>("output")
                .map(|s| s.as_str())
                .unwrap_or("docs");
            let manifest = sub_matches.get_flag("manifest");
            handle_convert_command(Path::new(input), Path::new(output), manifest, &config);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

fn load_cli_config(path: Option<&str>, sub_matches: &clap::ArgMatches) -> DoxidownConfig {
    let mut loader = match path {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new().with_optional_file("doxidown.toml"),
    };
    if let Some(flavor) = sub_matches.get_one::<String>("flavor") {
        loader = loader
            .set_override("convert.flavor", flavor.as_str())
            .unwrap_or_else(|e| fail(&format!("invalid --flavor: {e}")));
    }
    if let Some(base_url) = sub_matches.get_one::<String>("base-url") {
        loader = loader
            .set_override("project.base_url", base_url.as_str())
            .unwrap_or_else(|e| fail(&format!("invalid --base-url: {e}")));
    }
    if sub_matches.get_flag("suggest-todos") {
        loader = loader
            .set_override("convert.suggest_todos", true)
            .unwrap_or_else(|e| fail(&format!("configuration error: {e}")));
    }
    loader
        .build()
        .unwrap_or_else(|e| fail(&format!("configuration error: {e}")))
}

fn fail(message: &str) -> ! {
    eprintln!("Error: {message}");
    std::process::exit(1);
}

fn read_input_file(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| {
        fail(&format!("reading '{}': {e}", path.display()));
    })
}

fn handle_convert_command(
    input: &Path,
    output: &Path,
    write_manifest: bool,
    config: &DoxidownConfig,
) {
    let doxyfile = load_doxyfile(input);

    let mut sess = ParseSession::new();
    let index_xml = read_input_file(&input.join("index.xml"));
    index::parse_index(&index_xml, &mut sess)
        .unwrap_or_else(|e| fail(&format!("parsing index.xml: {e}")));

    // One file per index compound, strictly in index order. Later passes
    // depend on this order, so no parallelism here.
    let refids: Vec<String> = sess
        .index()
        .map(|index| index.compounds.iter().map(|c| c.refid.clone()).collect())
        .unwrap_or_default();
    for refid in &refids {
        let path = input.join(format!("{refid}.xml"));
        let xml = read_input_file(&path);
        compound::parse_compound_file(&xml, &mut sess)
            .unwrap_or_else(|e| fail(&format!("parsing '{}': {e}", path.display())));
    }

    index::backfill_member_kinds(&mut sess)
        .unwrap_or_else(|e| fail(&format!("back-fill pass: {e}")));
    index::link_hierarchy(&mut sess);

    let (resolver, lookup) = build_link_tables(&sess, config);
    let mode = match config.convert.flavor {
        OutputFlavor::Markdown => OutputMode::Markdown,
        OutputFlavor::Html => OutputMode::Html,
    };
    let options = RenderOptions {
        suggest_todos: config.convert.suggest_todos,
    };
    let extension = match config.convert.flavor {
        OutputFlavor::Markdown => config.convert.extension.as_str(),
        OutputFlavor::Html => "html",
    };

    fs::create_dir_all(output)
        .unwrap_or_else(|e| fail(&format!("creating '{}': {e}", output.display())));

    let mut manifest = Vec::new();
    let mut pages = 0usize;
    for compound in sess.compounds() {
        if doxidown_core::sections::is_anonymous_refid(&compound.id)
            || doxidown_core::sections::is_anonymous_name(&compound.name)
        {
            log::debug!("skipping anonymous compound '{}'", compound.id);
            continue;
        }
        let ctx = RenderContext::new(mode, &resolver, &lookup, options);
        let page = render_compound_page(compound, &ctx);
        let filename = format!("{}.{extension}", compound.id);
        let path = output.join(&filename);
        fs::write(&path, page)
            .unwrap_or_else(|e| fail(&format!("writing '{}': {e}", path.display())));
        manifest.push(serde_json::json!({
            "refid": compound.id,
            "kind": compound.kind.as_str(),
            "name": compound.name,
            "path": filename,
        }));
        pages += 1;
    }

    if write_manifest {
        let path = output.join("manifest.json");
        let json = serde_json::to_string_pretty(&manifest).expect("manifest serializes");
        fs::write(&path, json)
            .unwrap_or_else(|e| fail(&format!("writing '{}': {e}", path.display())));
    }

    let project = config
        .project
        .name
        .is_empty()
        .then(|| doxyfile.as_ref().and_then(|d| d.project_name()))
        .flatten()
        .unwrap_or(config.project.name.as_str());
    if !project.is_empty() {
        println!("Project: {project}");
    }
    println!(
        "Wrote {pages} page(s) to {} from {} XML file(s)",
        output.display(),
        sess.files_parsed()
    );
    let diagnostics = sess.diagnostics().len();
    if diagnostics > 0 {
        eprintln!("{diagnostics} warning(s); see log output for details");
    }
}

fn load_doxyfile(input: &Path) -> Option<Doxyfile> {
    let path = input.join("Doxyfile.xml");
    if !path.exists() {
        return None;
    }
    let xml = read_input_file(&path);
    // Branding metadata only; a malformed Doxyfile.xml still breaks the
    // grammar contract and aborts like any other file.
    let mut sess = ParseSession::new();
    match parse_doxyfile(&xml, &mut sess) {
        Ok(doxyfile) => Some(doxyfile),
        Err(e) => fail(&format!("parsing '{}': {e}", path.display())),
    }
}

/// Build the permalink and compound-lookup tables: one page per compound at
/// `<base_url><refid>`, members anchored on their parent compound's page.
fn build_link_tables(sess: &ParseSession, config: &DoxidownConfig) -> (MapResolver, MapLookup) {
    let base = &config.project.base_url;
    let mut resolver = MapResolver::new();
    let mut lookup = MapLookup::new();

    let null_resolver = NullResolver;
    let null_lookup = NullLookup;
    let plain = RenderContext::new(
        OutputMode::Plain,
        &null_resolver,
        &null_lookup,
        RenderOptions::default(),
    );

    for compound in sess.compounds() {
        resolver.insert(&compound.id, format!("{base}{}", compound.id));
        let brief = compound.briefdescription.as_ref().map(|desc| {
            doxidown_core::render::render_blocks(&desc.children, &plain)
                .join(" ")
                .trim()
                .to_string()
        });
        lookup.insert(CompoundSummary {
            refid: compound.id.clone(),
            kind: compound.kind.as_str().to_string(),
            name: compound.name.clone(),
            brief: brief.filter(|b| !b.is_empty()),
        });
        if let Some(location) = &compound.location {
            if compound.kind.as_str() == "file" {
                lookup.insert_path(location.file.clone(), compound.id.clone());
            }
        }
        for section in &compound.sections {
            for member in &section.members {
                resolver.insert(
                    &member.id,
                    format!("{base}{}#{}", compound.id, member.id),
                );
            }
        }
    }
    (resolver, lookup)
}
