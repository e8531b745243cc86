use std::collections::HashMap;

use anyhow::{Result, bail};
use clap::Parser;

use dnswizard_lib::{
    DnsDkimStatus, DnsLookup, Domain, ExpectedHostIps, Report, RowStatus, SystemResolver,
    validate_with,
};

#[derive(Parser)]
#[command(name = "dnswizard-cli")]
struct Cli {
    /// mail host to validate (e.g. mail.example.com)
    mailname: String,

    /// expected IPv4 address (repeatable; derived from the mail host's own
    /// records when no --ip/--ip6 is given)
    #[arg(long = "ip")]
    ipv4: Vec<String>,

    /// expected IPv6 address (repeatable)
    #[arg(long = "ip6")]
    ipv6: Vec<String>,

    /// domain to validate (repeatable)
    #[arg(long = "domain")]
    domains: Vec<String>,

    /// enable DKIM validation for a domain: <domain>:<selector>
    #[arg(long = "dkim")]
    dkim: Vec<String>,

    /// format: human|json|csv
    #[arg(long, default_value = "human")]
    format: String,

    /// write report to file (JSON/CSV selon --format)
    #[arg(long)]
    out: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let resolver = SystemResolver::from_system_conf()?;
    let expected = expected_ips(&resolver, &cli);
    let domains = domains_from_args(&cli)?;

    let report = validate_with(&resolver, &DnsDkimStatus, &cli.mailname, &expected, &domains)?;

    match cli.format.as_str() {
        "human" => {
            if !expected.is_resolved() {
                eprintln!("note: mail host did not resolve, no expected addresses");
            }
            print_human(&report);
        }
        "json" => {
            #[cfg(feature = "with-serde")]
            {
                let s = serde_json::to_string_pretty(&report)?;
                match &cli.out {
                    Some(path) => write_all_atomically(path, s.as_bytes())?,
                    None => println!("{s}"),
                }
            }
            #[cfg(not(feature = "with-serde"))]
            {
                eprintln!("format=json nécessite la feature 'with-serde'");
                std::process::exit(1);
            }
        }
        "csv" => {
            #[cfg(feature = "with-csv")]
            {
                let data = csv_bytes(&report)?;
                match &cli.out {
                    Some(path) => write_all_atomically(path, &data)?,
                    None => {
                        use std::io::Write;
                        std::io::stdout().write_all(&data)?;
                    }
                }
            }
            #[cfg(not(feature = "with-csv"))]
            {
                eprintln!("format=csv nécessite la feature 'with-csv'");
                std::process::exit(1);
            }
        }
        other => {
            eprintln!("unknown --format '{}', use: human|json|csv", other);
            std::process::exit(1);
        }
    }

    // codes de sortie : 0 OK, 2 findings en erreur, 1 fatal
    if report.has_errors() {
        std::process::exit(2);
    }
    Ok(())
}

fn expected_ips(resolver: &SystemResolver, cli: &Cli) -> ExpectedHostIps {
    if !cli.ipv4.is_empty() || !cli.ipv6.is_empty() {
        return ExpectedHostIps::resolved(cli.ipv4.clone(), cli.ipv6.clone());
    }
    let ipv4 = resolver.lookup_a(&cli.mailname);
    let ipv6 = resolver.lookup_aaaa(&cli.mailname);
    if ipv4.is_empty() && ipv6.is_empty() {
        ExpectedHostIps::unresolved()
    } else {
        ExpectedHostIps::resolved(ipv4, ipv6)
    }
}

fn domains_from_args(cli: &Cli) -> Result<Vec<Domain>> {
    let mut selectors: HashMap<String, String> = HashMap::new();
    for entry in &cli.dkim {
        let Some((domain, selector)) = entry.split_once(':') else {
            bail!("--dkim expects <domain>:<selector>, got '{entry}'");
        };
        selectors.insert(
            domain.trim().to_ascii_lowercase(),
            selector.trim().to_string(),
        );
    }

    let mut domains = Vec::new();
    for name in &cli.domains {
        let mut domain = Domain::new(name);
        if let Some(selector) = selectors.remove(&name.trim().to_ascii_lowercase()) {
            domain = domain.with_dkim_selector(selector);
        }
        domains.push(domain);
    }

    if !selectors.is_empty() {
        let unknown: Vec<String> = selectors.into_keys().collect();
        bail!(
            "--dkim given for domain(s) not listed via --domain: {}",
            unknown.join(", ")
        );
    }
    Ok(domains)
}

fn print_human(report: &Report) {
    println!("mail host: {}", report.mail_host);
    for row in &report.rows {
        let marker = match row.status {
            RowStatus::Ok => "[OK]   ",
            RowStatus::Warning => "[WARN] ",
            RowStatus::Error => "[ERROR]",
        };
        println!(
            "{} {:<8} {:<36} {}",
            marker, row.record_type, row.subject, row.message
        );
        println!("        expected: {}", row.expected_values.join(", "));
        if !row.actual_values.is_empty() {
            println!("        actual:   {}", row.actual_values.join(", "));
        }
    }
    println!("summary: {}", report.summary);
}

#[cfg(feature = "with-csv")]
fn csv_bytes(report: &Report) -> Result<Vec<u8>> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record([
        "scope",
        "subject",
        "recordType",
        "status",
        "expectedValues",
        "actualValues",
        "message",
    ])?;
    for row in &report.rows {
        wtr.write_record([
            row.scope.as_str(),
            row.subject.as_str(),
            row.record_type.as_str(),
            row.status.as_str(),
            row.expected_values.join("|").as_str(),
            row.actual_values.join("|").as_str(),
            row.message.as_str(),
        ])?;
    }
    let data = wtr.into_inner()?;
    Ok(data)
}

#[cfg(any(feature = "with-serde", feature = "with-csv"))]
fn write_all_atomically(path: &str, bytes: &[u8]) -> Result<()> {
    use std::io::Write;
    let tmp = format!("{}.tmp", path);
    {
        let mut f = std::fs::File::create(&tmp)?;
        f.write_all(bytes)?;
        f.sync_all()?;
    }
    std::fs::rename(&tmp, path)?;
    Ok(())
}
