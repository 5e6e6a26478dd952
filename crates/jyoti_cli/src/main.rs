use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use jyoti_vedic_base::dasha::{DAYS_PER_YEAR, active_periods};
use jyoti_vedic_base::varga::ALL_VARIATIONS;
use jyoti_vedic_base::{
    AshtakavargaMatrix, CONTRIBUTORS, ChartInput, ChartOutput, ChartRequest, Contributor,
    DashaCycleKind, DashaLevel, DashaLord, DashaNode, DashaTimeline, EngineConfig,
    NakshatraPosition, NormalizedPosition, PanchangDay, Rashi, VargaChart, VargaVariation,
    compose, deg_to_dms, nakshatra_from_longitude, normalize, panchang, panchang_with_sunrise,
    rashi_from_longitude, resolve, schedule, score_signs, varga_longitude, varga_sign,
};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

mod config;

use config::load_config;

#[derive(Parser)]
#[command(name = "jyoti", about = "Jyoti Vedic chart CLI")]
struct Cli {
    /// Print results as pretty JSON
    #[arg(long, global = true)]
    json: bool,
    /// Log at debug level (overrides RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,
    /// Engine config (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rashi from sidereal longitude
    Rashi {
        /// Sidereal ecliptic longitude in degrees
        lon: f64,
    },
    /// Nakshatra and pada from sidereal longitude
    Nakshatra {
        /// Sidereal ecliptic longitude in degrees
        lon: f64,
    },
    /// Full sign and nakshatra breakdown of a longitude
    Normalize {
        /// Sidereal ecliptic longitude in degrees
        lon: f64,
    },
    /// Decimal degrees to degrees/minutes/seconds
    Dms {
        /// Angle in decimal degrees
        deg: f64,
    },
    /// Divisional sign of a longitude
    Varga {
        /// Sidereal ecliptic longitude in degrees
        lon: f64,
        /// Comma-separated divisors, e.g. "9" or "2,9,30"
        divisors: String,
        /// Convention (e.g. HoraParivritti); default comes from the config
        #[arg(long, value_parser = parse_variation)]
        variation: Option<VargaVariation>,
    },
    /// Arudha of a house sign given the sign of its lord
    Arudha {
        /// House sign (1-12)
        house_sign: u8,
        /// Sign occupied by the house lord (1-12)
        lord_sign: u8,
    },
    /// Ashtakavarga from graha signs
    Ashtakavarga {
        /// 7 comma-separated signs (1-12), Sun through Saturn
        signs: String,
        /// Ascendant sign (1-12)
        #[arg(long)]
        asc: u8,
    },
    /// Dasha periods from the Moon's position
    Dasha {
        /// Moon sidereal longitude in degrees
        #[arg(long, required_unless_present = "nakshatra")]
        moon: Option<f64>,
        /// Moon nakshatra (1-27), instead of --moon
        #[arg(long, conflicts_with = "moon", requires = "elapsed")]
        nakshatra: Option<u8>,
        /// Fraction of the nakshatra already traversed [0, 1)
        #[arg(long)]
        elapsed: Option<f64>,
        /// Cycle: vimshottari, yogini, ashtottari (or numeric code)
        #[arg(long)]
        cycle: Option<DashaCycleKind>,
        /// Tree depth 1-5
        #[arg(long)]
        depth: Option<u8>,
        /// Show only the periods active this many years after birth
        #[arg(long, conflicts_with = "query_jd")]
        at: Option<f64>,
        /// Birth Julian Date; adds JD ranges to the output
        #[arg(long)]
        birth_jd: Option<f64>,
        /// Show only the periods active at this Julian Date (needs --birth-jd)
        #[arg(long, requires = "birth_jd")]
        query_jd: Option<f64>,
    },
    /// Tithi, nakshatra, yoga, karana (and vaar) for Sun/Moon longitudes
    Panchang {
        /// Sun sidereal longitude in degrees
        sun: f64,
        /// Moon sidereal longitude in degrees
        moon: f64,
        /// Local civil sunrise Julian Date; adds the vaar
        #[arg(long)]
        sunrise_jd: Option<f64>,
    },
    /// Compose a chart from a JSON positions file
    Chart {
        /// JSON file with `positions` and `ascendant_longitude`
        input: PathBuf,
        /// Compute every section
        #[arg(long)]
        all: bool,
        #[arg(long)]
        vargas: bool,
        /// Comma-separated divisors (default from config)
        #[arg(long)]
        divisors: Option<String>,
        #[arg(long)]
        ashtakavarga: bool,
        #[arg(long)]
        dasha: bool,
        /// Comma-separated cycles (default from config)
        #[arg(long)]
        cycles: Option<String>,
        /// Dasha depth 1-5 (default from config)
        #[arg(long)]
        depth: Option<u8>,
        #[arg(long)]
        arudha: bool,
        #[arg(long)]
        panchang: bool,
        /// Local civil sunrise Julian Date; adds the vaar
        #[arg(long)]
        sunrise_jd: Option<f64>,
    },
}

// ---------------------------------------------------------------------------
// Setup
// ---------------------------------------------------------------------------

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// Argument parsing helpers
// ---------------------------------------------------------------------------

fn parse_variation(s: &str) -> Result<VargaVariation, String> {
    VargaVariation::from_name(s.trim()).ok_or_else(|| {
        let valid: Vec<&str> = ALL_VARIATIONS.iter().map(|v| v.name()).collect();
        format!("unknown varga variation '{s}' (valid: {})", valid.join(", "))
    })
}

fn parse_graha_rashis(s: &str) -> Result<[u8; 7]> {
    let vals = s
        .split(',')
        .map(|v| {
            v.trim()
                .parse::<u8>()
                .with_context(|| format!("invalid rashi value '{v}'"))
        })
        .collect::<Result<Vec<_>>>()?;
    <[u8; 7]>::try_from(vals.as_slice()).map_err(|_| {
        anyhow::anyhow!("expected 7 comma-separated rashi numbers, got {}", vals.len())
    })
}

fn parse_divisors(s: &str) -> Result<Vec<u16>> {
    s.split(',')
        .map(|v| {
            let v = v.trim();
            let digits = v.strip_prefix(['D', 'd']).unwrap_or(v);
            digits
                .parse::<u16>()
                .with_context(|| format!("invalid divisor '{v}'"))
        })
        .collect()
}

fn parse_cycles(s: &str) -> Result<Vec<DashaCycleKind>> {
    s.split(',')
        .map(|v| DashaCycleKind::from_name(v).with_context(|| format!("invalid cycle '{v}'")))
        .collect()
}

fn read_chart_input(path: &Path) -> Result<ChartInput> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("cannot read chart input {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("cannot parse chart input {}", path.display()))
}

// ---------------------------------------------------------------------------
// Text output
// ---------------------------------------------------------------------------

fn sign_name(sign: u8) -> &'static str {
    Rashi::from_number(sign).map_or("?", Rashi::name)
}

fn print_normalized(label: &str, pos: &NormalizedPosition) {
    let dms = pos.sign.dms;
    println!(
        "{label:<10} {:>9.4} deg  {:<10} {:>2} deg {:02} min {:05.2} sec  {} pada {}",
        pos.longitude,
        pos.sign.rashi.name(),
        dms.degrees,
        dms.minutes,
        dms.seconds,
        pos.nakshatra.nakshatra.name(),
        pos.nakshatra.pada,
    );
}

fn print_varga_chart(chart: &VargaChart) {
    println!("D{} {} ({})", chart.divisor, chart.name, chart.variation);
    println!("  {:<10} {}", "Lagna", sign_name(chart.ascendant));
    for p in &chart.placements {
        println!(
            "  {:<10} {:<10} {:>9.4} deg",
            p.body.name(),
            sign_name(p.sign),
            p.longitude
        );
    }
}

fn print_sign_row(label: &str, row: &[u8; 12]) {
    let cells: Vec<String> = row.iter().map(|v| format!("{v:>3}")).collect();
    let total: u16 = row.iter().map(|&v| v as u16).sum();
    println!("{label:<14}{}  = {total}", cells.join(""));
}

fn print_ashtakavarga(m: &AshtakavargaMatrix) {
    let header: Vec<String> = (1..=12).map(|s| format!("{s:>3}")).collect();
    println!("{:<14}{}", "", header.join(""));
    for (row, contributor) in m.bindus.iter().zip(CONTRIBUTORS) {
        let label = match contributor {
            Contributor::Graha(g) => g.name(),
            Contributor::Lagna => "Lagna",
        };
        print_sign_row(label, row);
    }
    print_sign_row("SAV", &m.sav);
    print_sign_row("Trikona", &m.after_trikona);
    print_sign_row("Ekadhipatya", &m.after_ekadhipatya);
}

fn period_line(node: &DashaNode, birth_jd: Option<f64>) -> String {
    let mut line = format!(
        "{}: {} ({:.4} - {:.4} y, {:.4} y)",
        node.level.name(),
        node.lord,
        node.start_offset,
        node.end_offset(),
        node.duration_years,
    );
    if let Some(jd) = birth_jd {
        let (start, end) = node.jd_range(jd);
        line.push_str(&format!(" [JD {start:.4} - {end:.4}]"));
    }
    line
}

fn print_dasha_tree(node: &DashaNode, birth_jd: Option<f64>) {
    let indent = "  ".repeat(node.depth as usize);
    println!("{indent}{}", period_line(node, birth_jd));
    for child in &node.children {
        print_dasha_tree(child, birth_jd);
    }
}

fn print_timeline_header(t: &DashaTimeline) {
    println!(
        "{} dasha, nakshatra {} ({:.4} elapsed), balance {:.4} y of {} y, depth {}",
        t.cycle_name, t.nakshatra, t.elapsed_fraction, t.balance_years, t.total_years, t.max_depth
    );
}

fn print_panchang(day: &PanchangDay) {
    println!(
        "Tithi:     {} ({} {}) - {:.4} deg into tithi",
        day.tithi.tithi.name(),
        day.tithi.paksha.name(),
        day.tithi.number_in_paksha,
        day.tithi.degrees_in_tithi
    );
    println!(
        "Nakshatra: {} pada {} - {:.4} deg into nakshatra",
        day.nakshatra.nakshatra.name(),
        day.nakshatra.pada,
        day.nakshatra.degrees_in_nakshatra
    );
    println!(
        "Yoga:      {} ({}) - {:.4} deg into yoga",
        day.yoga.yoga.name(),
        day.yoga.number,
        day.yoga.degrees_in_yoga
    );
    println!(
        "Karana:    {} ({}) - {:.4} deg into karana",
        day.karana.karana.name(),
        day.karana.number,
        day.karana.degrees_in_karana
    );
    if let Some(vaar) = day.vaar {
        println!("Vaar:      {} ({})", vaar.name(), vaar.english_name());
    }
}

fn print_chart(out: &ChartOutput) {
    print_normalized("Lagna", &out.ascendant);
    if let Some(positions) = &out.positions {
        for p in positions {
            print_normalized(p.body.name(), &p.position);
        }
    }
    for chart in &out.vargas {
        println!();
        print_varga_chart(chart);
    }
    if let Some(m) = &out.ashtakavarga {
        println!("\nAshtakavarga");
        print_ashtakavarga(m);
    }
    for t in &out.dashas {
        println!();
        print_timeline_header(t);
        for node in &t.mahadashas {
            println!("  {}", period_line(node, None));
        }
    }
    if !out.arudha_padas.is_empty() {
        println!("\nArudha padas");
        for p in &out.arudha_padas {
            println!(
                "  {:<4} {:<14} {} (lord {})",
                p.pada.label(),
                p.name,
                sign_name(p.resolution.final_sign),
                p.lord.name()
            );
        }
    }
    if let Some(day) = &out.panchang {
        println!("\nPanchang");
        print_panchang(day);
    }
}

/// One entry of an active-period chain, without its subtree.
#[derive(Serialize)]
struct ActivePeriod {
    level: DashaLevel,
    lord: DashaLord,
    start_offset: f64,
    end_offset: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_jd: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end_jd: Option<f64>,
}

impl ActivePeriod {
    fn new(node: &DashaNode, birth_jd: Option<f64>) -> Self {
        let jd = birth_jd.map(|b| node.jd_range(b));
        Self {
            level: node.level,
            lord: node.lord,
            start_offset: node.start_offset,
            end_offset: node.end_offset(),
            start_jd: jd.map(|r| r.0),
            end_jd: jd.map(|r| r.1),
        }
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn run(cli: Cli, config: &EngineConfig) -> Result<()> {
    let json = cli.json;

    match cli.command {
        Commands::Rashi { lon } => {
            if !lon.is_finite() {
                bail!("longitude must be finite");
            }
            let info = rashi_from_longitude(lon);
            if json {
                return print_json(&info);
            }
            let dms = info.dms;
            println!(
                "{} ({}) - {} deg {} min {:.1} sec ({:.4} deg in rashi)",
                info.rashi.name(),
                info.rashi.western_name(),
                dms.degrees,
                dms.minutes,
                dms.seconds,
                info.degree_in_sign
            );
        }

        Commands::Nakshatra { lon } => {
            if !lon.is_finite() {
                bail!("longitude must be finite");
            }
            let info = nakshatra_from_longitude(lon);
            if json {
                return print_json(&info);
            }
            println!(
                "{} ({}) pada {} - {:.4} deg in nakshatra ({:.4} elapsed)",
                info.nakshatra.name(),
                info.number,
                info.pada,
                info.degrees_in_nakshatra,
                info.elapsed_fraction
            );
        }

        Commands::Normalize { lon } => {
            if !lon.is_finite() {
                bail!("longitude must be finite");
            }
            let pos = normalize(lon);
            if json {
                return print_json(&pos);
            }
            print_normalized("Longitude", &pos);
        }

        Commands::Dms { deg } => {
            let dms = deg_to_dms(deg);
            if json {
                return print_json(&dms);
            }
            println!("{} deg {} min {:.2} sec", dms.degrees, dms.minutes, dms.seconds);
        }

        Commands::Varga {
            lon,
            divisors,
            variation,
        } => {
            let mut results = Vec::new();
            for divisor in parse_divisors(&divisors)? {
                let variation = variation.unwrap_or_else(|| config.varga.variation_for(divisor));
                let sign = varga_sign(lon, divisor, variation)
                    .with_context(|| format!("D{divisor} of {lon}"))?;
                let varga_lon = varga_longitude(lon, divisor, variation)?;
                results.push(serde_json::json!({
                    "divisor": divisor,
                    "variation": variation,
                    "sign": sign,
                    "longitude": varga_lon,
                }));
                if !json {
                    let dms = deg_to_dms(varga_lon % 30.0);
                    println!(
                        "D{divisor} ({variation}): {} {}  ({varga_lon:.4} deg)",
                        sign_name(sign),
                        dms
                    );
                }
            }
            if json {
                return print_json(&results);
            }
        }

        Commands::Arudha {
            house_sign,
            lord_sign,
        } => {
            let r = resolve(house_sign, lord_sign).context("arudha")?;
            if json {
                return print_json(&r);
            }
            println!(
                "House sign {} ({}), lord in {} ({})",
                r.input_house_sign,
                sign_name(r.input_house_sign),
                r.lord_sign,
                sign_name(r.lord_sign)
            );
            println!(
                "Raw arudha: {} ({}), house {} from the house sign",
                r.raw_derived_sign,
                sign_name(r.raw_derived_sign),
                r.house_from_input_sign
            );
            println!(
                "Arudha:     {} ({}) [{:?}]",
                r.final_sign,
                sign_name(r.final_sign),
                r.exception_applied
            );
        }

        Commands::Ashtakavarga { signs, asc } => {
            let graha_signs = parse_graha_rashis(&signs)?;
            let m = score_signs(&graha_signs, asc).context("ashtakavarga")?;
            if json {
                return print_json(&m);
            }
            print_ashtakavarga(&m);
        }

        Commands::Dasha {
            moon,
            nakshatra,
            elapsed,
            cycle,
            depth,
            at,
            birth_jd,
            query_jd,
        } => {
            let moon_pos = match (moon, nakshatra) {
                (Some(lon), _) => {
                    if !lon.is_finite() {
                        bail!("moon longitude must be finite");
                    }
                    nakshatra_from_longitude(lon)
                }
                (None, Some(n)) => {
                    NakshatraPosition::from_parts(n, elapsed.unwrap_or(0.0))
                        .context("moon nakshatra")?
                }
                (None, None) => bail!("either --moon or --nakshatra is required"),
            };
            let kind = cycle.unwrap_or(config.dasha.default_cycle);
            let depth = depth.unwrap_or(config.dasha.max_depth);
            let timeline = schedule(&moon_pos, &kind.cycle(), depth)
                .with_context(|| format!("{} dasha", kind.name()))?;

            let years = match (at, query_jd, birth_jd) {
                (Some(y), _, _) => Some(y),
                (None, Some(q), Some(b)) => Some((q - b) / DAYS_PER_YEAR),
                _ => None,
            };

            if let Some(years) = years {
                let chain = active_periods(&timeline, years);
                if json {
                    let periods: Vec<ActivePeriod> =
                        chain.iter().map(|n| ActivePeriod::new(n, birth_jd)).collect();
                    return print_json(&periods);
                }
                print_timeline_header(&timeline);
                if chain.is_empty() {
                    println!("No period active {years:.4} y after birth");
                }
                for node in chain {
                    let indent = "  ".repeat(node.depth as usize);
                    println!("{indent}{}", period_line(node, birth_jd));
                }
            } else {
                if json {
                    return print_json(&timeline);
                }
                print_timeline_header(&timeline);
                for node in &timeline.mahadashas {
                    print_dasha_tree(node, birth_jd);
                }
            }
        }

        Commands::Panchang {
            sun,
            moon,
            sunrise_jd,
        } => {
            let day = match sunrise_jd {
                Some(jd) => panchang_with_sunrise(sun, moon, jd),
                None => panchang(sun, moon),
            }
            .context("panchang")?;
            if json {
                return print_json(&day);
            }
            print_panchang(&day);
        }

        Commands::Chart {
            input,
            all,
            vargas,
            divisors,
            ashtakavarga,
            dasha,
            cycles,
            depth,
            arudha,
            panchang,
            sunrise_jd,
        } => {
            let chart_input = read_chart_input(&input)?;
            let mut request = if all {
                ChartRequest::all()
            } else {
                ChartRequest {
                    include_vargas: vargas || divisors.is_some(),
                    include_ashtakavarga: ashtakavarga,
                    include_dasha: dasha || cycles.is_some(),
                    include_arudha: arudha,
                    include_panchang: panchang || sunrise_jd.is_some(),
                    ..ChartRequest::default()
                }
            };
            if let Some(d) = divisors {
                request.varga_divisors = parse_divisors(&d)?;
            }
            if let Some(c) = cycles {
                request.dasha_cycles = parse_cycles(&c)?;
            }
            request.dasha_depth = depth;
            request.sunrise_jd = sunrise_jd;

            let out = compose(&chart_input, &request, config)
                .with_context(|| format!("composing chart from {}", input.display()))?;
            if json {
                return print_json(&out);
            }
            print_chart(&out);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = load_config(cli.config.as_deref())?;
    run(cli, &config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn graha_rashis_need_seven_values() {
        assert_eq!(
            parse_graha_rashis("1, 5,7,1,9,12,10").unwrap(),
            [1, 5, 7, 1, 9, 12, 10]
        );
        assert!(parse_graha_rashis("1,2,3").is_err());
        assert!(parse_graha_rashis("1,2,3,4,5,6,x").is_err());
    }

    #[test]
    fn divisors_accept_d_prefix() {
        assert_eq!(parse_divisors("D9, 10,d60").unwrap(), vec![9, 10, 60]);
        assert!(parse_divisors("nine").is_err());
    }

    #[test]
    fn cycles_by_name() {
        assert_eq!(
            parse_cycles("yogini,Vimshottari").unwrap(),
            vec![DashaCycleKind::Yogini, DashaCycleKind::Vimshottari]
        );
        assert!(parse_cycles("kalachakra").is_err());
    }

    #[test]
    fn variation_names() {
        assert_eq!(
            parse_variation("horaparivritti"),
            Ok(VargaVariation::HoraParivritti)
        );
        assert!(parse_variation("bogus").is_err());
    }

    #[test]
    fn dasha_args_parse() {
        let cli = Cli::try_parse_from([
            "jyoti", "dasha", "--moon", "130", "--cycle", "yogini", "--depth", "2", "--json",
        ])
        .unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::Dasha { moon, cycle, depth, .. } => {
                assert_eq!(moon, Some(130.0));
                assert_eq!(cycle, Some(DashaCycleKind::Yogini));
                assert_eq!(depth, Some(2));
            }
            _ => panic!("expected dasha"),
        }
    }

    #[test]
    fn bundled_sample_chart_composes() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
        let input = read_chart_input(&dir.join("sample_chart.json")).unwrap();
        let config_path = dir.join("jyoti.toml");
        let config = load_config(Some(config_path.as_path())).unwrap();
        let out = compose(&input, &ChartRequest::all(), &config).unwrap();
        assert_eq!(out.ascendant.sign.sign, 4);
        assert_eq!(out.vargas.len(), 16);
        assert_eq!(out.vargas[1].variation, VargaVariation::HoraParivritti);
        assert_eq!(out.arudha_padas.len(), 12);
    }

    #[test]
    fn dasha_needs_a_moon() {
        assert!(Cli::try_parse_from(["jyoti", "dasha"]).is_err());
        assert!(Cli::try_parse_from(["jyoti", "dasha", "--nakshatra", "4"]).is_err());
    }

    #[test]
    fn lookups_reject_non_finite_longitude() {
        let config = EngineConfig::default();
        for cmd in ["rashi", "nakshatra", "normalize"] {
            for lon in ["NaN", "inf", "-inf"] {
                let cli = Cli::try_parse_from(["jyoti", cmd, "--", lon]).unwrap();
                let err = run(cli, &config).unwrap_err();
                assert!(err.to_string().contains("finite"), "{cmd} {lon}: {err}");
            }
        }
    }
}
