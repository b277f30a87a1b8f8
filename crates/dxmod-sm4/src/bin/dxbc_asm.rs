use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{bail, Context};
use dxmod_dxbc::DxbcFile;
use dxmod_sm4::{
    assemble, assemble_new_container, disassemble, render_program, LineError, MismatchLog,
    Sm4Program,
};
use tracing_subscriber::EnvFilter;

fn usage() -> &'static str {
    "\
dxbc_asm: assemble, reconcile and dump SM4/SM5 shader containers

USAGE:
    dxbc_asm assemble <listing.asm> <original.dxbc> <out.dxbc> [--keep-going]
    dxbc_asm build <listing.asm> <out.dxbc> [--keep-going]
    dxbc_asm reconcile <in.dxbc> <raw.asm> [out.asm]
    dxbc_asm dump <in.dxbc>

FLAGS:
    --keep-going      Skip statements that fail to parse and report them at the end
                      (default: stop at the first one)

Log verbosity is controlled by RUST_LOG (e.g. RUST_LOG=dxmod_sm4=debug).
"
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = real_main() {
        eprintln!("error: {err:#}");
        process::exit(1);
    }
}

fn real_main() -> anyhow::Result<()> {
    let mut positional: Vec<String> = Vec::new();
    let mut keep_going = false;

    for arg in env::args().skip(1) {
        match arg.as_str() {
            "-h" | "--help" => {
                print!("{}", usage());
                return Ok(());
            }
            "--keep-going" => keep_going = true,
            _ if arg.starts_with('-') => bail!("unknown option {arg:?}\n\n{}", usage()),
            _ => positional.push(arg),
        }
    }

    let Some((command, rest)) = positional.split_first() else {
        bail!("missing command\n\n{}", usage());
    };
    let paths: Vec<PathBuf> = rest.iter().map(PathBuf::from).collect();

    match (command.as_str(), paths.as_slice()) {
        ("assemble", [listing, original, out]) => {
            let text = read_text(listing)?;
            let original = read_bytes(original)?;
            let mut errors = Vec::new();
            let bytes = assemble(&text, &original, keep_going.then_some(&mut errors))
                .with_context(|| format!("failed to assemble {}", listing.display()))?;
            report_errors(&errors);
            write_bytes(out, &bytes)
        }
        ("build", [listing, out]) => {
            let text = read_text(listing)?;
            let mut errors = Vec::new();
            let bytes = assemble_new_container(&text, keep_going.then_some(&mut errors))
                .with_context(|| format!("failed to assemble {}", listing.display()))?;
            report_errors(&errors);
            write_bytes(out, &bytes)
        }
        ("reconcile", [container, raw, out @ ..]) if out.len() <= 1 => {
            let bytes = read_bytes(container)?;
            let raw_text = read_text(raw)?;
            let mut log = MismatchLog::new();
            let text = disassemble(&bytes, &raw_text, Some(&mut log))
                .with_context(|| format!("failed to reconcile {}", container.display()))?;
            for (line, mismatch) in log.iter() {
                eprintln!(
                    "mismatch: {line}\n  binary:      {:08x?}\n  reassembled: {:08x?}",
                    mismatch.binary, mismatch.reassembled
                );
            }
            match out.first() {
                Some(path) => fs::write(path, text)
                    .with_context(|| format!("failed to write {}", path.display())),
                None => {
                    print!("{text}");
                    Ok(())
                }
            }
        }
        ("dump", [container]) => {
            let bytes = read_bytes(container)?;
            let dxbc = DxbcFile::parse(&bytes)
                .with_context(|| format!("failed to parse {} as DXBC", container.display()))?;
            println!("{}", dxbc.debug_summary());
            println!("checksum ok: {}", dxbc.checksum_matches());
            println!();
            let program = Sm4Program::parse_from_dxbc(&dxbc)
                .context("DXBC is missing a usable SHDR/SHEX shader chunk")?;
            print!("{}", render_program(&program)?);
            Ok(())
        }
        _ => bail!("unexpected arguments for {command:?}\n\n{}", usage()),
    }
}

fn read_text(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn read_bytes(path: &Path) -> anyhow::Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("failed to read {}", path.display()))
}

fn write_bytes(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    fs::write(path, bytes).with_context(|| format!("failed to write {}", path.display()))
}

fn report_errors(errors: &[LineError]) {
    for err in errors {
        eprintln!("skipped {err}");
    }
    if !errors.is_empty() {
        eprintln!("{} statement(s) skipped", errors.len());
    }
}
