//! Crate for running `permframe`'s commands and scenario files.  The CLI itself is a very thin
//! wrapper which parses CLI args and immediately calls into this, so every command's output can be
//! tested without spawning a process.

pub mod scenario;
mod utils;

use std::{fmt::Write, path::PathBuf};

use colored::Colorize;
use itertools::Itertools;
use log::LevelFilter;
use permframe::{Degree, Gf2MatrixGroup, Group, Matrix2, Perm, PermBuf, SymmetricGroup};
use scenario::Scenario;
use simple_logger::SimpleLogger;
use structopt::StructOpt;

/// Listing the extent of larger degrees would print hundreds of thousands of lines
const MAX_EXTENT_POINTS: u8 = 8;

const SEPARATOR: &str = "---------------";

pub fn init_logging(level: LevelFilter) {
    let result = SimpleLogger::new()
        .without_timestamps()
        .with_colors(true)
        .with_level(level)
        .init();
    if let Err(e) = result {
        eprintln!("Couldn't initialise logging: {}", e);
    }
}

/// The sub-commands which `permframe` can run.  Permutations are written as strings of letters
/// (e.g. `BCDA`), and matrices as rows (e.g. `01/10`).
#[derive(Debug, Clone, StructOpt)]
pub enum Command {
    /// Composes two permutations, applying the right-hand one first
    Compose { lhs: PermBuf, rhs: PermBuf },
    /// Prints the inverse of a permutation
    Inverse { perm: PermBuf },
    /// Prints the order of a permutation
    Order { perm: PermBuf },
    /// Prints a permutation in cycle notation
    Cycles { perm: PermBuf },
    /// Prints every power of a permutation, ending at the identity
    Powers { perm: PermBuf },
    /// Lists every permutation on some number of points (at most 8)
    Extent { num_points: u8 },
    /// Lists the group generated by some permutations
    Subgroup {
        #[structopt(required = true)]
        generators: Vec<PermBuf>,
    },
    /// Lists the group generated by some 2x2 matrices over GF(2).  Defaults to `01/10` and
    /// `11/10`, which generate every invertible matrix.
    Matrices { generators: Vec<Matrix2> },
    /// Runs a scenario file (`*.toml`)
    Scenario {
        #[structopt(parse(from_os_str))]
        file: PathBuf,
    },
    /// Runs some self-checks and then the built-in scenario
    Demo,
}

/// Runs a [`Command`], returning the text it should print
pub fn run(command: &Command) -> anyhow::Result<String> {
    let mut out = String::new();
    match command {
        Command::Compose { lhs, rhs } => {
            writeln!(out, "{} x {} = {}", lhs, rhs, lhs.try_compose(rhs)?)?
        }
        Command::Inverse { perm } => writeln!(out, "{}", perm.inv())?,
        Command::Order { perm } => writeln!(out, "{}", perm.order())?,
        Command::Cycles { perm } => writeln!(out, "{}", perm.cycle_notation())?,
        Command::Powers { perm } => {
            write_powers(&mut out, &SymmetricGroup::from(perm.as_perm()), perm.as_perm())?
        }
        Command::Extent { num_points } => {
            let degree = Degree::try_from(*num_points)?;
            if *num_points > MAX_EXTENT_POINTS {
                return Err(anyhow::Error::msg(format!(
                    "Refusing to list every permutation of {} (at most {} points are allowed)",
                    degree, MAX_EXTENT_POINTS
                )));
            }
            let extent = degree.extent().collect_vec();
            write_elements(&mut out, &SymmetricGroup::new(degree), &extent)?;
        }
        Command::Subgroup { generators } => {
            let first = generators
                .first()
                .ok_or_else(|| anyhow::Error::msg("Need at least one generator"))?;
            let group = SymmetricGroup::from(first.as_perm());
            let subgroup = group.generate_subgroup(generators).ok_or_else(|| {
                anyhow::Error::msg(format!("Every generator must have {}", group.degree()))
            })?;
            writeln!(out, "Generated {} elements:", subgroup.len())?;
            write_elements(&mut out, &group, &subgroup)?;
        }
        Command::Matrices { generators } => {
            let defaults = [Matrix2::from_bits(0b0110), Matrix2::from_bits(0b1110)];
            let generators = match generators.as_slice() {
                [] => &defaults[..],
                gens => gens,
            };
            // Matrix composition can't fail
            let group = Gf2MatrixGroup
                .generate_subgroup(generators)
                .unwrap_or_default();
            writeln!(out, "Generated {} matrices:", group.len())?;
            write_elements(&mut out, &Gf2MatrixGroup, &group)?;
            if !Gf2MatrixGroup.is_subgroup(&group) {
                writeln!(out, "{}", "These matrices don't form a group".red())?;
            }
        }
        Command::Scenario { file } => {
            log::info!("Loading scenario from {:?}", file);
            Scenario::from_file(file)?.run()?.write_to(&mut out)?;
        }
        Command::Demo => run_demo(&mut out)?,
    }
    Ok(out)
}

/// Writes the elements of a [`Group`] as a numbered list between two separators
pub fn write_elements<'a, G: Group + 'a>(
    out: &mut String,
    group: &G,
    elements: impl IntoIterator<Item = &'a G::Element>,
) -> std::fmt::Result {
    writeln!(out, "{}", SEPARATOR)?;
    for (i, elem) in elements.into_iter().enumerate() {
        writeln!(out, "{:>2}: {}", i, group.display(elem.as_ref()))?;
    }
    writeln!(out, "{}", SEPARATOR)
}

/// Writes every power of `elem` on a single line, e.g. `BCA - (ABC),  CAB - (ACB),  ...`
fn write_powers<G: Group>(out: &mut String, group: &G, elem: &G::View) -> anyhow::Result<()> {
    let powers = group
        .powers(elem)
        .ok_or_else(|| anyhow::Error::msg(format!("{} never returns to the identity", elem)))?;
    writeln!(
        out,
        "{}.",
        powers.iter().map(|p| group.display(p.as_ref())).join(",  ")
    )?;
    Ok(())
}

/// Composes `a` and `b`, failing unless the result is `expected`
fn check_expect(out: &mut String, a: &Perm, b: &Perm, expected: &Perm) -> anyhow::Result<()> {
    let product = a.try_compose(b)?;
    if product != *expected {
        return Err(anyhow::Error::msg(format!(
            "{} x {} = {}, but expected {}",
            a, b, product, expected
        )));
    }
    writeln!(out, "{} x {} = {} ({})", a, b, product, "correct".green())?;
    Ok(())
}

fn check_expect_str(out: &mut String, a: &str, b: &str, expected: &str) -> anyhow::Result<()> {
    check_expect(
        out,
        &PermBuf::parse(a)?,
        &PermBuf::parse(b)?,
        &PermBuf::parse(expected)?,
    )
}

fn run_demo(out: &mut String) -> anyhow::Result<()> {
    writeln!(out, "{}", "Composition".bold())?;
    check_expect_str(out, "ABC", "ABC", "ABC")?;
    check_expect_str(out, "ABC", "CAB", "CAB")?;
    check_expect_str(out, "CAB", "ABC", "CAB")?;
    let cab = PermBuf::parse("CAB")?;
    check_expect(out, &cab, &cab.inv(), &PermBuf::parse("ABC")?)?;
    // Composition doesn't commute
    check_expect_str(out, "BAC", "ACB", "BCA")?;
    check_expect_str(out, "ACB", "BAC", "CAB")?;

    let bca = PermBuf::parse("BCA")?;
    writeln!(out, "{}", "Powers of BCA".bold())?;
    write_powers(out, &SymmetricGroup::from(bca.as_perm()), bca.as_perm())?;

    writeln!(out, "{}", "Invertible 2x2 matrices over GF(2)".bold())?;
    out.push_str(&run(&Command::Matrices {
        generators: Vec::new(),
    })?);

    Scenario::demo()?.run()?.write_to(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use permframe::{Matrix2, PermBuf};

    use super::{check_expect_str, run, Command};

    fn perm(s: &str) -> PermBuf {
        PermBuf::parse(s).unwrap()
    }

    #[track_caller]
    fn check(command: Command, exp_output: &str) {
        colored::control::set_override(false);
        assert_eq!(run(&command).unwrap(), exp_output);
    }

    #[test]
    fn single_perm_commands() {
        check(
            Command::Compose {
                lhs: perm("BCA"),
                rhs: perm("BCA"),
            },
            "BCA x BCA = CAB\n",
        );
        check(Command::Inverse { perm: perm("CAB") }, "BCA\n");
        check(Command::Order { perm: perm("BCAED") }, "6\n");
        check(Command::Cycles { perm: perm("ADBC") }, "(A)(BDC)\n");
        check(
            Command::Powers { perm: perm("BCA") },
            "BCA - (ABC),  CAB - (ACB),  ABC - (A)(B)(C).\n",
        );
    }

    #[test]
    fn extent() {
        check(
            Command::Extent { num_points: 3 },
            "---------------
 0: ABC - (A)(B)(C)
 1: ACB - (A)(BC)
 2: BAC - (AB)(C)
 3: BCA - (ABC)
 4: CAB - (ACB)
 5: CBA - (AC)(B)
---------------
",
        );
        assert!(run(&Command::Extent { num_points: 0 }).is_err());
        assert!(run(&Command::Extent { num_points: 9 }).is_err());
    }

    #[test]
    fn subgroup() {
        check(
            Command::Subgroup {
                generators: vec![perm("BCA")],
            },
            "Generated 3 elements:
---------------
 0: ABC - (A)(B)(C)
 1: BCA - (ABC)
 2: CAB - (ACB)
---------------
",
        );
        let mismatched = Command::Subgroup {
            generators: vec![perm("BCA"), perm("BA")],
        };
        assert!(run(&mismatched).is_err());
    }

    #[test]
    fn matrices() {
        colored::control::set_override(false);
        let output = run(&Command::Matrices {
            generators: Vec::new(),
        })
        .unwrap();
        assert!(output.starts_with("Generated 6 matrices:\n"));
        assert!(output.contains(" 0: 01/10 - M0110\n"));
        assert!(!output.contains("don't form a group"));

        let singular = run(&Command::Matrices {
            generators: vec![Matrix2::from_bits(0b1100), Matrix2::IDENTITY],
        })
        .unwrap();
        assert!(singular.contains("don't form a group"));
    }

    #[test]
    fn compose_mismatched_degrees() {
        let command = Command::Compose {
            lhs: perm("BCA"),
            rhs: perm("BADC"),
        };
        assert!(run(&command).is_err());
    }

    #[test]
    fn failed_self_check() {
        let mut out = String::new();
        let err = check_expect_str(&mut out, "BCA", "BCA", "BCA").unwrap_err();
        assert_eq!(err.to_string(), "BCA x BCA = CAB, but expected BCA");
        assert!(out.is_empty());
    }

    #[test]
    fn demo() {
        colored::control::set_override(false);
        let output = run(&Command::Demo).unwrap();
        assert!(output.contains("CAB x ABC = CAB (correct)\n"));
        assert!(output.contains("CAB x BCA = ABC (correct)\n"));
        assert!(output.contains("BAC x ACB = BCA (correct)\n"));
        assert!(output.contains("BCA - (ABC),  CAB - (ACB),  ABC - (A)(B)(C).\n"));
        assert!(output.contains("Generated 6 matrices:\n"));
        assert!(output.contains("=== D4 (4 points) ===\n"));
    }
}
