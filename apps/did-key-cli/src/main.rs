use clap::Parser as _;
use color_eyre::eyre::Context as _;
use did_key::{KeyPair, KeyType};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(clap::Parser, Debug)]
#[clap(version, about)]
struct Cli {
	/// Pretty print the JSON output.
	#[clap(long, env = "DID_KEY_PRETTY")]
	pretty: bool,
	#[clap(subcommand)]
	command: Command,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
	/// Generate a new random key and its did:key.
	Generate {
		#[clap(long, short, default_value = "ed25519")]
		key_type: KeyType,
	},
	/// Resolve a did:key into its DID document.
	Resolve { did: String },
	/// Build the DID document for a hex encoded public key.
	FromPublicKey {
		#[clap(long, short)]
		key_type: KeyType,
		public_key: String,
	},
	/// Build the DID document for a hex encoded private key.
	FromPrivateKey {
		#[clap(long, short)]
		key_type: KeyType,
		private_key: String,
	},
}

/// [`KeyPair`] as printed by `generate`, with hex encoded keys.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct GeneratedKey {
	did: String,
	key_type: KeyType,
	public_key: String,
	private_key: String,
}

impl From<KeyPair> for GeneratedKey {
	fn from(pair: KeyPair) -> Self {
		Self {
			key_type: pair.did.key_type(),
			did: pair.did.into_string(),
			public_key: hex::encode(&pair.public_key),
			private_key: hex::encode(pair.private_key.as_slice()),
		}
	}
}

fn decode_hex(s: &str, what: &str) -> color_eyre::Result<Vec<u8>> {
	hex::decode(s.trim_start_matches("0x"))
		.wrap_err_with(|| format!("{what} was not valid hex"))
}

fn run(cli: Cli) -> color_eyre::Result<serde_json::Value> {
	let output = match cli.command {
		Command::Generate { key_type } => {
			let pair = did_key::generate(key_type)
				.wrap_err_with(|| format!("failed to generate {key_type} key"))?;
			info!(did = %pair.did, "generated did:key");
			serde_json::to_value(GeneratedKey::from(pair))?
		}
		Command::Resolve { did } => {
			let result = did_key::resolve(&did)
				.wrap_err_with(|| format!("failed to resolve {did}"))?;
			serde_json::to_value(result)?
		}
		Command::FromPublicKey {
			key_type,
			public_key,
		} => {
			let public_key = decode_hex(&public_key, "public key")?;
			let doc = did_key::from_public_key(&public_key, key_type)
				.wrap_err("failed to build document from public key")?;
			serde_json::to_value(doc)?
		}
		Command::FromPrivateKey {
			key_type,
			private_key,
		} => {
			let private_key = decode_hex(&private_key, "private key")?;
			let doc = did_key::from_private_key(&private_key, key_type)
				.wrap_err("failed to build document from private key")?;
			serde_json::to_value(doc)?
		}
	};
	Ok(output)
}

fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	tracing_subscriber::registry()
		.with(EnvFilter::try_from_default_env().unwrap_or("info".into()))
		.with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
		.init();

	let cli = Cli::parse();
	let pretty = cli.pretty;
	let output = run(cli)?;
	let rendered = if pretty {
		serde_json::to_string_pretty(&output)
	} else {
		serde_json::to_string(&output)
	}
	.wrap_err("failed to serialize output")?;
	println!("{rendered}");

	Ok(())
}

#[cfg(test)]
mod test {
	use super::*;

	use clap::CommandFactory as _;

	#[test]
	fn verify_cli() {
		Cli::command().debug_assert();
	}

	#[test]
	fn test_from_private_key_command() -> color_eyre::Result<()> {
		let cli = Cli::try_parse_from([
			"did-key",
			"from-private-key",
			"--key-type",
			"secp256k1",
			"1a71ba74b52bf27454cfe1e51776c74a9a27a71ae711f55b8a486dd49f692ed6",
		])?;
		let output = run(cli)?;
		assert_eq!(
			output["id"],
			"did:key:zQ3shrrqApMHnwgHBagm6XuVpGGuAM7RbRXbf57pmvTLUnQUt"
		);
		Ok(())
	}

	#[test]
	fn test_generate_command() -> color_eyre::Result<()> {
		let cli = Cli::try_parse_from(["did-key", "generate", "-k", "secp256k1"])?;
		let output = run(cli)?;
		assert!(output["did"].as_str().unwrap().starts_with("did:key:zQ3s"));
		assert_eq!(output["keyType"], "secp256k1");
		assert_eq!(output["publicKey"].as_str().unwrap().len(), 66);
		Ok(())
	}

	#[test]
	fn test_rejects_unsupported_key_type() {
		let result = Cli::try_parse_from(["did-key", "generate", "-k", "p256"]);
		assert!(result.is_err());
	}

	#[test]
	fn test_resolve_reports_malformed() {
		let cli = Cli::try_parse_from(["did-key", "resolve", "not-a-did"]).unwrap();
		assert!(run(cli).is_err());
	}
}
