use std::io::{Read, Result, Write};

use log::{debug, trace};
use prost::Message;
use prost_types::compiler::CodeGeneratorResponse;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = faillible_main() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn faillible_main() -> Result<()> {
    let mut buf = Vec::new();
    std::io::stdin().read_to_end(&mut buf)?;
    trace!("read {} request bytes", buf.len());

    // Generation errors go back to protoc, which reports them against the
    // input files.
    let res = swift_protobuf_build::generate_from_bytes(&buf).unwrap_or_else(|e| {
        debug!("generation failed: {}", e);
        CodeGeneratorResponse {
            error: Some(e.to_string()),
            ..Default::default()
        }
    });

    buf.clear();
    res.encode(&mut buf)?;
    std::io::stdout().write_all(&buf)?;

    Ok(())
}
