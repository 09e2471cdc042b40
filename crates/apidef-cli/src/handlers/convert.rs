//! Convert command handler: rewrite a definition file as YAML

use crate::cli::ConvertArgs;
use crate::error::{Error, Result};
use crate::output::OutputWriter;
use apidef_core::{DefinitionParser, Format};
use std::fs;
use tracing::{debug, instrument};

/// Handle the convert command
#[instrument(skip(output), fields(file = %args.file.display()))]
pub fn handle_convert(args: ConvertArgs, output: &mut OutputWriter) -> Result<()> {
    if !args.file.exists() {
        return Err(Error::FileNotFound { path: args.file });
    }

    let parser = DefinitionParser::new();
    let definition = parser.parse_file(&args.file)?;
    let yaml = parser.serialize(&definition, Format::Yaml)?;

    let target = args
        .save_to
        .unwrap_or_else(|| args.file.with_extension(Format::Yaml.primary_extension()));
    if target == args.file {
        output.warning(&format!("Overwriting {} in place", target.display()))?;
    }

    let permissions = fs::metadata(&args.file)?.permissions();
    fs::write(&target, yaml)?;
    fs::set_permissions(&target, permissions)?;
    debug!(target = %target.display(), "Wrote converted definition");

    output.success(&format!("Converted {} to {}", args.file.display(), target.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::test_buffer::SharedBuffer;
    use apidef_core::PropertyType;
    use tempfile::tempdir;

    fn quiet_output() -> OutputWriter {
        OutputWriter::with_writers(
            false,
            true,
            Box::new(SharedBuffer::default()),
            Box::new(SharedBuffer::default()),
        )
    }

    #[test]
    fn test_json_becomes_yml_next_to_source() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("queues.json");
        fs::write(
            &source,
            r#"{"id": "queues", "parent": "auth/projects", "url_prefix": "queues",
                "properties": [{"id": "size", "type": "INT", "minimum": 0}]}"#,
        )
        .unwrap();

        handle_convert(
            ConvertArgs {
                file: source.clone(),
                save_to: None,
            },
            &mut quiet_output(),
        )
        .unwrap();

        let target = dir.path().join("queues.yml");
        let converted = DefinitionParser::new().parse_file(&target).unwrap();
        let original = DefinitionParser::new().parse_file(&source).unwrap();
        assert_eq!(converted, original);
        assert_eq!(converted.properties[0].property_type, PropertyType::Integer);
        assert!(fs::read_to_string(&target).unwrap().contains("type: integer"));
    }

    #[test]
    fn test_explicit_target() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("queues.json");
        let target = dir.path().join("converted.yaml");
        fs::write(&source, r#"{"id": "queues"}"#).unwrap();

        handle_convert(
            ConvertArgs {
                file: source,
                save_to: Some(target.clone()),
            },
            &mut quiet_output(),
        )
        .unwrap();
        assert!(target.exists());
    }

    #[test]
    fn test_missing_file() {
        let err = handle_convert(
            ConvertArgs {
                file: "/nonexistent/queues.json".into(),
                save_to: None,
            },
            &mut quiet_output(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }
}
