#![forbid(unsafe_code)]
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use garde::{
    detect_violations, io,
    storage::{JsonStorage, Storage},
    AssignOptions, DayCarry, MonthRosterBuilder, SchedError, VacationIndex, YearMonth,
};
use rand::{rngs::StdRng, SeedableRng};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de génération des gardes mensuelles (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON du classeur
    #[arg(long, global = true, default_value = "garde.json")]
    workbook: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CarryArg {
    Sticky,
    NextDayOnly,
}

impl From<CarryArg> for DayCarry {
    fn from(arg: CarryArg) -> Self {
        match arg {
            CarryArg::Sticky => DayCarry::Sticky,
            CarryArg::NextDayOnly => DayCarry::NextDayOnly,
        }
    }
}

#[derive(clap::Args, Debug, Clone, Copy)]
struct PolicyArgs {
    /// Devenir de la garde de jour après une date sans garde de jour [défaut : sticky]
    #[arg(long, value_enum)]
    day_carry: Option<CarryArg>,
    /// Exclut aussi la garde de jour de la veille de la nuit suivante
    #[arg(long)]
    rest_after_day_duty: bool,
}

impl PolicyArgs {
    /// Applique les options passées en ligne de commande sur `base`.
    fn over(self, base: AssignOptions) -> AssignOptions {
        AssignOptions {
            day_carry: self.day_carry.map(Into::into).unwrap_or(base.day_carry),
            rest_after_day_duty: self.rest_after_day_duty || base.rest_after_day_duty,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Importer le registre des gardes (`name,count`)
    ImportStaff {
        #[arg(long)]
        csv: String,
    },

    /// Importer les jours fériés (`date`)
    ImportHolidays {
        #[arg(long)]
        csv: String,
    },

    /// Importer les demandes de congés (`name` + 12 colonnes de mois)
    ImportVacations {
        #[arg(long)]
        csv: String,
        /// Mois de la première colonne
        #[arg(long, default_value_t = garde::vacation::DEFAULT_ANCHOR_MONTH)]
        anchor_month: u32,
    },

    /// Générer le tableau d'un mois
    Generate {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
        /// Graine du tirage entre ex aequo (sinon aléatoire)
        #[arg(long)]
        seed: Option<u64>,
        #[command(flatten)]
        policy: PolicyArgs,
        /// Conserve les dates déjà pourvues si le mois échoue
        #[arg(long)]
        keep_partial: bool,
    },

    /// Afficher et optionnellement exporter un mois
    List {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Vérifier un mois enregistré (règles de génération, sauf options données)
    Check {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
        #[command(flatten)]
        policy: PolicyArgs,
        /// Export CSV des anomalies (optionnel)
        #[arg(long)]
        report: Option<String>,
    },

    /// Valider un mois : il ne sera plus régénéré
    Finalize {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
    },

    /// Afficher les compteurs
    Ledger,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .try_init();
    }

    let storage = JsonStorage::open(&cli.workbook)?;
    let mut workbook = storage.load_or_default()?;

    let code = match cli.cmd {
        Commands::ImportStaff { csv } => {
            workbook.ledger = io::import_ledger_csv(csv)?;
            storage.save(&workbook)?;
            0
        }
        Commands::ImportHolidays { csv } => {
            let dates = io::import_holidays_csv(csv)?;
            workbook.holidays.extend(dates);
            storage.save(&workbook)?;
            0
        }
        Commands::ImportVacations { csv, anchor_month } => {
            workbook.vacations = io::import_vacations_csv(csv, anchor_month)?;
            storage.save(&workbook)?;
            0
        }
        Commands::Generate {
            year,
            month,
            seed,
            policy,
            keep_partial,
        } => {
            let month = YearMonth::new(year, month)?;
            let options = policy.over(AssignOptions::default());
            let (request, warnings) = match workbook.request(month, options) {
                Ok(r) => r,
                Err(SchedError::Finalized(m)) => {
                    println!("{m}: roster is finalized, nothing to do");
                    std::process::exit(0);
                }
                Err(e) => return Err(e.into()),
            };
            for w in &warnings {
                eprintln!("warning: ignored vacation token {:?} for {}", w.token, w.staff);
            }

            let mut rng = match seed {
                Some(s) => StdRng::seed_from_u64(s),
                None => StdRng::from_entropy(),
            };
            let mut builder = MonthRosterBuilder::new(request)?;
            if let Err(err) = builder.run(&mut rng) {
                if keep_partial {
                    workbook.store(builder.roster().clone(), builder.engine().ledger().clone());
                    storage.save(&workbook)?;
                    eprintln!(
                        "{month}: {} day(s) kept in {}",
                        builder.roster().days.len(),
                        storage.path().display()
                    );
                }
                return Err(err).with_context(|| format!("generating roster for {month}"));
            }
            let outcome = builder.finish();
            if !outcome.relaxed.is_empty() {
                eprintln!(
                    "{} assignment(s) needed relaxed fairness",
                    outcome.relaxed.len()
                );
            }
            let assigned = outcome.roster.days.len();
            workbook.store_outcome(outcome);
            storage.save(&workbook)?;
            println!("{month}: {assigned} day(s) assigned -> {}", storage.path().display());
            0
        }
        Commands::List {
            year,
            month,
            out_json,
            out_csv,
        } => {
            let month = YearMonth::new(year, month)?;
            let roster = workbook
                .roster(month)
                .with_context(|| format!("no roster stored for {month}"))?;
            if let Some(path) = out_json {
                io::export_roster_json(path, roster)?;
            }
            if let Some(path) = out_csv {
                io::export_roster_csv(path, roster, &workbook.holidays)?;
            }
            for d in &roster.days {
                println!(
                    "{} | {} | {}",
                    d.date,
                    d.day.as_ref().map(|s| s.as_str()).unwrap_or("-"),
                    d.night
                );
            }
            0
        }
        Commands::Check {
            year,
            month,
            policy,
            report,
        } => {
            let month = YearMonth::new(year, month)?;
            let roster = workbook
                .roster(month)
                .with_context(|| format!("no roster stored for {month}"))?;
            let (vacations, _) = VacationIndex::build(&workbook.vacations, month.month())?;
            let violations = detect_violations(
                roster,
                &workbook.holidays,
                &vacations,
                &workbook.carry_seed(month),
                policy.over(roster.options),
            );
            if violations.is_empty() {
                println!("OK: no violations");
                0
            } else {
                eprintln!("Found {} violation(s)", violations.len());
                if let Some(path) = report {
                    io::export_violations_csv(path, &violations)?;
                }
                // Code 2 = WARNING/INCOMPLETE
                2
            }
        }
        Commands::Finalize { year, month } => {
            let month = YearMonth::new(year, month)?;
            workbook.finalize(month)?;
            storage.save(&workbook)?;
            println!("{month}: finalized in {}", storage.path().display());
            0
        }
        Commands::Ledger => {
            for e in &workbook.ledger.entries {
                println!("{} | {}", e.staff, e.count);
            }
            0
        }
    };

    std::process::exit(code);
}
