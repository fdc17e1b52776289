//! # AAS SDK CLI
//!
//! Command-line access to AAS registries, repositories, and discovery.
//!
//! Services are configured through `AAS_SDK_*` environment variables; see
//! `aas-sdk help`.

use aas_sdk_client::{decode_id_base64url, encode_id_base64url};
use aas_sdk_core::{Key, KeyType, Reference, SpecificAssetId};
use aas_sdk_service::{
    AasService, GetAasByAssetIdOptions, GetAasByIdOptions, GetAasListOptions,
    GetSubmodelByIdOptions,
};
use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::env;
use tracing_subscriber::EnvFilter;

mod config;

use config::CliConfig;

/// Flags shared by the fetching commands.
#[derive(Debug, Default)]
struct Flags {
    no_registry: bool,
    submodels: bool,
    concept_descriptions: bool,
    limit: Option<u32>,
    cursor: Option<String>,
}

/// Split arguments into positionals and flags.
fn parse_flags(args: &[String]) -> Result<(Vec<String>, Flags)> {
    let mut flags = Flags::default();
    let mut positionals = Vec::new();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--no-registry" => flags.no_registry = true,
            "--submodels" => flags.submodels = true,
            "--concept-descriptions" => flags.concept_descriptions = true,
            "--limit" => {
                let value = iter.next().context("--limit needs a value")?;
                flags.limit = Some(value.parse().context("Invalid --limit")?);
            }
            "--cursor" => {
                flags.cursor = Some(iter.next().context("--cursor needs a value")?.clone());
            }
            flag if flag.starts_with("--") => bail!("Unknown flag: {flag}"),
            _ => positionals.push(arg.clone()),
        }
    }

    Ok((positionals, flags))
}

/// Parse `name=value` into a specific asset id.
fn parse_asset_id(arg: &str) -> Result<SpecificAssetId> {
    let (name, value) = arg
        .split_once('=')
        .with_context(|| format!("Expected name=value, got {arg:?}"))?;
    Ok(SpecificAssetId::new(name, value))
}

/// Parse a reference from `Type=value` keys or a single JSON argument.
fn parse_reference(args: &[String]) -> Result<Reference> {
    if let [json] = args {
        if json.trim_start().starts_with('{') {
            return serde_json::from_str(json).context("Invalid reference JSON");
        }
    }

    let keys = args
        .iter()
        .map(|arg| {
            let (key_type, value) = arg
                .split_once('=')
                .with_context(|| format!("Expected Type=value, got {arg:?}"))?;
            let key_type: KeyType = key_type.parse()?;
            Ok(Key::new(key_type, value))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Reference::model(keys))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn require<'a>(positionals: &'a [String], usage: &str) -> &'a str {
    if let Some(first) = positionals.first() {
        return first;
    }
    eprintln!("Usage: aas-sdk {usage}");
    std::process::exit(1);
}

fn service() -> Result<AasService> {
    let config = CliConfig::from_env()?;
    AasService::new(config.service_config()).context("Failed to create AAS service")
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_help();
        return Ok(());
    }

    let (positionals, flags) = parse_flags(&args[2..])?;

    match args[1].as_str() {
        "encode" => {
            let id = require(&positionals, "encode <identifier>");
            println!("{}", encode_id_base64url(id));
        }
        "decode" => {
            let encoded = require(&positionals, "decode <encoded>");
            let decoded = decode_id_base64url(encoded).context("Failed to decode")?;
            println!("{decoded}");
        }
        "shells" => {
            let list = service()?
                .get_aas_list(GetAasListOptions {
                    prefer_registry: !flags.no_registry,
                    limit: flags.limit,
                    cursor: flags.cursor,
                    include_submodels: flags.submodels,
                    include_concept_descriptions: flags.concept_descriptions,
                })
                .await?;
            print_json(&list)?;
        }
        "shell" => {
            let id = require(&positionals, "shell <aas-id>");
            let found = service()?
                .get_aas_by_id(GetAasByIdOptions {
                    use_registry_endpoint: !flags.no_registry,
                    include_submodels: flags.submodels,
                    include_concept_descriptions: flags.concept_descriptions,
                    ..GetAasByIdOptions::new(id)
                })
                .await?;
            print_json(&found)?;
        }
        "endpoint" => {
            let id = require(&positionals, "endpoint <aas-id>");
            let endpoint = service()?
                .get_aas_endpoint_by_id(id, !flags.no_registry)
                .await?;
            println!("{endpoint}");
        }
        "submodel" => {
            let id = require(&positionals, "submodel <submodel-id>");
            let found = service()?
                .submodel_service()
                .get_submodel_by_id(GetSubmodelByIdOptions {
                    use_registry_endpoint: !flags.no_registry,
                    include_concept_descriptions: flags.concept_descriptions,
                    ..GetSubmodelByIdOptions::new(id)
                })
                .await?;
            print_json(&found)?;
        }
        "lookup" => {
            require(&positionals, "lookup <name=value>...");
            let asset_ids = positionals
                .iter()
                .map(|arg| parse_asset_id(arg))
                .collect::<Result<Vec<_>>>()?;
            let found = service()?
                .get_aas_by_asset_id(GetAasByAssetIdOptions {
                    asset_ids,
                    include_submodels: flags.submodels,
                    include_concept_descriptions: flags.concept_descriptions,
                })
                .await?;
            print_json(&found)?;
        }
        "resolve" => {
            require(&positionals, "resolve <Type=value>... | resolve '<reference json>'");
            let reference = parse_reference(&positionals)?;
            let resolved = service()?.resolve_reference(&reference).await?;
            print_json(&resolved)?;
        }
        "help" | "--help" | "-h" => {
            print_help();
        }
        cmd => {
            eprintln!("Unknown command: {cmd}");
            print_help();
            std::process::exit(1);
        }
    }

    Ok(())
}

fn print_help() {
    println!(
        r#"AAS SDK CLI

USAGE:
    aas-sdk <COMMAND> [OPTIONS]

COMMANDS:
    encode <id>               Encode an AAS identifier to base64url (no padding)
    decode <encoded>          Decode a base64url-encoded identifier
    shells                    List shells
    shell <aas-id>            Fetch one shell
    endpoint <aas-id>         Print the endpoint of a shell
    submodel <submodel-id>    Fetch one submodel
    lookup <name=value>...    Find shells by specific asset ids
    resolve <Type=value>...   Resolve a model reference into endpoints
    help                      Show this help message

OPTIONS:
    --no-registry             Skip the registry and read the repository directly
    --submodels               Include submodels of fetched shells
    --concept-descriptions    Include referenced concept descriptions
    --limit <n>               Page size for listings
    --cursor <cursor>         Page cursor for listings

ENVIRONMENT:
    AAS_SDK_REGISTRY_URL                          AAS registry
    AAS_SDK_REPOSITORY_URL                        AAS repository
    AAS_SDK_SUBMODEL_REGISTRY_URL                 Submodel registry (default: AAS registry)
    AAS_SDK_SUBMODEL_REPOSITORY_URL               Submodel repository (default: AAS repository)
    AAS_SDK_CONCEPT_DESCRIPTION_REPOSITORY_URL    Concept description repository
    AAS_SDK_DISCOVERY_URL                         Discovery service
    AAS_SDK_BEARER_TOKEN                          Bearer token for all services
    AAS_SDK_TIMEOUT_SECS                          Request timeout in seconds
    RUST_LOG                                      Log filter (default: info)

EXAMPLES:
    aas-sdk encode "urn:example:aas:asset1"
    aas-sdk shell "https://example.com/ids/aas/test-123" --submodels
    aas-sdk lookup serialNumber=SN-1
    aas-sdk resolve Submodel=urn:example:sm:1 SubmodelElementCollection=temperature
"#
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn flags_are_separated_from_positionals() {
        let (positionals, flags) =
            parse_flags(&args(&["urn:aas:1", "--submodels", "--limit", "5"])).unwrap();
        assert_eq!(positionals, vec!["urn:aas:1"]);
        assert!(flags.submodels);
        assert_eq!(flags.limit, Some(5));
        assert!(!flags.no_registry);
    }

    #[test]
    fn unknown_flag_is_an_error() {
        assert!(parse_flags(&args(&["--bogus"])).is_err());
        assert!(parse_flags(&args(&["--limit"])).is_err());
    }

    #[test]
    fn reference_from_key_pairs() {
        let reference = parse_reference(&args(&[
            "AssetAdministrationShell=aas-1",
            "Submodel=sm-1",
            "SubmodelElementCollection=temperature",
        ]))
        .unwrap();
        assert_eq!(reference.keys.len(), 3);
        assert_eq!(reference.keys[2].key_type, KeyType::SubmodelElementCollection);
        assert_eq!(reference.keys[2].value, "temperature");
    }

    #[test]
    fn reference_from_json() {
        let reference = parse_reference(&args(&[
            r#"{"type":"ExternalReference","keys":[{"type":"GlobalReference","value":"urn:x"}]}"#,
        ]))
        .unwrap();
        assert_eq!(reference, Reference::external("urn:x"));
    }

    #[test]
    fn reference_rejects_unknown_key_type() {
        assert!(parse_reference(&args(&["Shell=aas-1"])).is_err());
    }

    #[test]
    fn asset_id_needs_separator() {
        assert_eq!(
            parse_asset_id("serialNumber=SN-1").unwrap(),
            SpecificAssetId::new("serialNumber", "SN-1")
        );
        assert!(parse_asset_id("serialNumber").is_err());
    }
}
