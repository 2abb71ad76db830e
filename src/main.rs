use anyhow::{Context, Result, bail};
use clap::Parser;
use url::Url;
use xmlfetch::config::{ProxySettings, Settings};
use xmlfetch::proxy::resolve_proxy;
use xmlfetch::xml::{TransformArguments, TransformRequest, XmlClient};

/// xmlfetch - fetch XML resources over HTTP(S)
///
/// Requests a URL, checks the response is 200 OK with well-formed XML, and
/// prints the document. Transient transport failures are retried with
/// backoff up to the configured budget. An XSLT stylesheet can optionally be
/// applied to the fetched document before printing.
///
/// Proxy settings can be given as flags, environment variables, or a JSON
/// settings file.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// The URL of the XML resource to fetch
    #[arg(value_name = "URL")]
    url: Url,

    /// Retries to attempt on transient transport failures (capped at 2)
    #[arg(long, default_value_t = 0, value_name = "N")]
    retries: i32,

    /// Print the raw response body without validating it as XML
    #[arg(long)]
    raw: bool,

    /// URL of an XSLT stylesheet to apply to the fetched document
    #[arg(long, value_name = "URL")]
    xslt: Option<Url>,

    /// Stylesheet parameter in the form name=value (repeatable)
    #[arg(long = "param", value_name = "NAME=VALUE")]
    params: Vec<String>,

    /// JSON settings file with Proxy and WebApi sections
    #[arg(long, value_name = "PATH")]
    settings: Option<std::path::PathBuf>,

    /// Proxy server address (also via XMLFETCH_PROXY_SERVER)
    #[arg(long, env = "XMLFETCH_PROXY_SERVER", value_name = "HOST")]
    proxy_server: Option<String>,

    /// Proxy account username (also via XMLFETCH_PROXY_USER)
    #[arg(long, env = "XMLFETCH_PROXY_USER", value_name = "USER")]
    proxy_user: Option<String>,

    /// Proxy account password (also via XMLFETCH_PROXY_PASSWORD)
    #[arg(long, env = "XMLFETCH_PROXY_PASSWORD", value_name = "PASSWORD")]
    proxy_password: Option<String>,

    /// Proxy account domain (also via XMLFETCH_PROXY_DOMAIN)
    #[arg(long, env = "XMLFETCH_PROXY_DOMAIN", value_name = "DOMAIN")]
    proxy_domain: Option<String>,
}

impl Cli {
    /// Proxy settings from the command line, falling back to the settings
    /// file when no server is given directly.
    fn proxy_settings(&self) -> Result<ProxySettings> {
        if self.proxy_server.is_some() {
            return Ok(ProxySettings {
                server: self.proxy_server.clone(),
                user: self.proxy_user.clone(),
                password: self.proxy_password.clone(),
                domain: self.proxy_domain.clone(),
            });
        }

        if let Some(path) = &self.settings {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read settings file {}", path.display()))?;
            let settings = Settings::from_json(&json)
                .with_context(|| format!("Failed to parse settings file {}", path.display()))?;
            return Ok(settings.proxy);
        }

        Ok(ProxySettings::default())
    }

    fn arguments(&self) -> Result<TransformArguments> {
        let mut arguments = TransformArguments::new();
        for param in &self.params {
            match param.split_once('=') {
                Some((name, value)) => arguments.add(name, value),
                None => bail!("Invalid --param {:?}: expected name=value", param),
            }
        }
        Ok(arguments)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let proxy = resolve_proxy(&cli.proxy_settings()?)?;
    let client = XmlClient::new(proxy.as_ref())?;

    let output = match &cli.xslt {
        Some(stylesheet) => {
            let request = TransformRequest::new(
                cli.url.clone(),
                Some(stylesheet.clone()),
                cli.arguments()?,
            );
            client.transform_to_string(&request).await?
        }
        None if cli.raw => client.fetch_string(&cli.url).await?,
        None => {
            let payload = client
                .fetch_document_with_retries(&cli.url, cli.retries)
                .await?;
            payload.into_string()
        }
    };

    println!("{}", output);
    Ok(())
}
