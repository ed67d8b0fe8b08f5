use clap::{Parser, Subcommand, ValueEnum};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "proxy-cli")]
#[command(about = "Query a running energy data proxy", long_about = None)]
struct Cli {
    #[arg(short, long, env = "PROXY_URL", default_value = "http://localhost:8000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Wind,
    Solar,
    Biomasse,
    StromSpeicher,
}

impl Kind {
    fn path(self) -> &'static str {
        match self {
            Kind::Wind => "get_einheit_wind",
            Kind::Solar => "get_einheit_solar",
            Kind::Biomasse => "get_einheit_biomasse",
            Kind::StromSpeicher => "get_einheit_strom_speicher",
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch one registered unit
    Einheit {
        #[arg(value_enum)]
        kind: Kind,
        /// MaStR number of the requesting market actor
        #[arg(long)]
        marktakteur: String,
        /// MaStR number of the unit
        #[arg(long)]
        einheit: String,
    },
    /// List grid connection points
    Netzanschlusspunkte {
        #[arg(long)]
        marktakteur: String,
        #[arg(long)]
        start_ab: Option<i64>,
        #[arg(long)]
        limit: Option<i64>,
    },
    /// Fetch the day-ahead total load forecast
    LoadForecast {
        /// 16 character EIC code, e.g. 10Y1001A1001A82H
        #[arg(long)]
        zone: String,
        /// yyyyMMddHHmm (UTC)
        #[arg(long)]
        start: String,
        /// yyyyMMddHHmm (UTC)
        #[arg(long)]
        end: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let res = match cli.command {
        Commands::Einheit {
            kind,
            marktakteur,
            einheit,
        } => {
            client
                .post(format!("{}/{}", base, kind.path()))
                .json(&json!({
                    "marktakteurMastrNummer": marktakteur,
                    "einheitMastrNummer": einheit,
                }))
                .send()
                .await?
        }
        Commands::Netzanschlusspunkte {
            marktakteur,
            start_ab,
            limit,
        } => {
            let mut body = json!({ "marktakteurMastrNummer": marktakteur });
            if let Some(start_ab) = start_ab {
                body["startAb"] = json!(start_ab);
            }
            if let Some(limit) = limit {
                body["limit"] = json!(limit);
            }
            client
                .post(format!("{}/get_liste_alle_netzanschlusspunkte", base))
                .json(&body)
                .send()
                .await?
        }
        Commands::LoadForecast { zone, start, end } => {
            client
                .get(format!("{}/day_ahead_load_forecast", base))
                .query(&[
                    ("bidding_zone", zone),
                    ("period_start", start),
                    ("period_end", end),
                ])
                .send()
                .await?
        }
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: proxy returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        std::process::exit(1);
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
