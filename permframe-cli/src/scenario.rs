//! Scenario files (`*.toml`), which describe a subgroup `D` by its generators along with a list of
//! 'transformers' that are used to build cosets and conjugates of `D`.

use std::{fmt::Write, path::Path};

use colored::Colorize;
use itertools::Itertools;
use permframe::{Degree, Group, GroupSet, IncompatibleDegrees, PermBuf, SymmetricGroup};
use serde::Deserialize;

use crate::{
    utils::{get_true, parse_toml, read_file_to_string},
    write_elements,
};

/// The scenario run by `permframe demo`
const DEMO_SCENARIO: &str = include_str!("../scenarios/d4.toml");

/// The contents of a scenario file
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    /// Name printed at the top of the report
    #[serde(default)]
    pub name: Option<String>,
    /// The permutations which generate the subgroup `D`
    pub generators: Vec<PermBuf>,
    /// The permutations used to build cosets and conjugates of `D`
    #[serde(default)]
    pub transformers: Vec<PermBuf>,
    /// Check that conjugating by the first transformer preserves composition
    #[serde(default = "get_true")]
    pub check_homomorphism: bool,
}

impl Scenario {
    /// Reads and validates a `Scenario` from a TOML file
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let toml_string = read_file_to_string(path)?;
        Self::from_toml(&toml_string)
    }

    /// Parses and validates a `Scenario` from a TOML string
    pub fn from_toml(toml_string: &str) -> anyhow::Result<Self> {
        let scenario: Self = parse_toml(toml_string)?;
        scenario.degree()?;
        Ok(scenario)
    }

    /// The dihedral group of a square, transformed by two 3-cycles and the identity
    pub fn demo() -> anyhow::Result<Self> {
        Self::from_toml(DEMO_SCENARIO)
    }

    /// The [`Degree`] shared by every permutation in this `Scenario`.  Fails if there are no
    /// generators, or if two permutations have different [`Degree`]s.
    pub fn degree(&self) -> anyhow::Result<Degree> {
        if self.generators.is_empty() {
            return Err(anyhow::Error::msg("Scenarios need at least one generator"));
        }
        let mut degree = None;
        for perm in self.generators.iter().chain(&self.transformers) {
            IncompatibleDegrees::test_err_opt(&mut degree, perm.degree()).map_err(|e| {
                anyhow::Error::msg(format!("Can't use {} in this scenario: {}", perm, e))
            })?;
        }
        degree.ok_or_else(|| anyhow::Error::msg("Scenarios need at least one generator"))
    }

    pub fn run(&self) -> anyhow::Result<ScenarioReport> {
        let group = SymmetricGroup::new(self.degree()?);

        log::info!("Generating D from {} generators", self.generators.len());
        let subgroup = group
            .generate_subgroup(&self.generators)
            .ok_or_else(mismatched_degrees)?;

        log::info!("Building cosets");
        let cosets = self
            .transformers
            .iter()
            .map(|t| -> anyhow::Result<Coset> {
                let elements = subgroup
                    .iter()
                    .map(|d| d.try_compose(t))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Coset {
                    transformer: t.clone(),
                    elements,
                })
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        let coset_union: GroupSet<SymmetricGroup> = cosets
            .iter()
            .flat_map(|c| c.elements.iter().cloned())
            .collect();

        log::info!("Conjugating D by each transformer");
        let conjugates = self
            .transformers
            .iter()
            .map(|t| -> anyhow::Result<Conjugate> {
                let elements = subgroup
                    .iter()
                    .map(|d| d.conjugate_by(t))
                    .collect::<Result<Vec<_>, _>>()?;
                let closure = group
                    .generate_subgroup(&elements)
                    .ok_or_else(mismatched_degrees)?;
                Ok(Conjugate {
                    transformer: t.clone(),
                    is_group: closure.len() == elements.len(),
                    elements,
                })
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        log::info!("Conjugating the generators by every coset element");
        let mut regenerated = Vec::new();
        for t in cosets.iter().flat_map(|c| &c.elements) {
            let generators = self
                .generators
                .iter()
                .map(|g| g.conjugate_by(t))
                .collect::<Result<Vec<_>, _>>()?;
            let elements = group
                .generate_subgroup(&generators)
                .ok_or_else(mismatched_degrees)?;
            regenerated.push((elements, t.clone()));
        }
        // Stable, so transformers stay in coset order within each group
        regenerated.sort_by(|(a, _), (b, _)| (a.len(), a).cmp(&(b.len(), b)));
        let mut conjugate_groups: Vec<ConjugateGroup> = Vec::new();
        for (elements, transformer) in regenerated {
            match conjugate_groups.last_mut() {
                Some(last) if last.elements == elements => last.transformers.push(transformer),
                _ => conjugate_groups.push(ConjugateGroup {
                    elements,
                    transformers: vec![transformer],
                }),
            }
        }

        let preserves_composition = match self.transformers.first() {
            Some(t) if self.check_homomorphism => {
                log::info!("Checking that conjugation by {} preserves composition", t);
                Some((t.clone(), conjugation_preserves_composition(&subgroup, t)?))
            }
            _ => None,
        };

        Ok(ScenarioReport {
            name: self.name.clone(),
            group,
            generators: self.generators.clone(),
            subgroup,
            cosets,
            cosets_cover_group: group.degree().num_perms() == Some(coset_union.len()),
            conjugates,
            conjugate_groups,
            preserves_composition,
        })
    }
}

fn mismatched_degrees() -> anyhow::Error {
    anyhow::Error::msg("Permutations in this scenario have different degrees")
}

/// Checks that `conj(a) ∘ conj(b) == conj(a ∘ b)` for every `a` and `b` in `subgroup`, where
/// `conj` is conjugation by `t`.
fn conjugation_preserves_composition(
    subgroup: &GroupSet<SymmetricGroup>,
    t: &PermBuf,
) -> Result<bool, IncompatibleDegrees> {
    for (a, b) in subgroup.iter().cartesian_product(subgroup.iter()) {
        let product_of_conjugates = a.conjugate_by(t)?.try_compose(&b.conjugate_by(t)?)?;
        let conjugate_of_product = a.try_compose(b)?.conjugate_by(t)?;
        if product_of_conjugates != conjugate_of_product {
            log::debug!(
                "{} x {} conjugates to {}, but the conjugates compose to {}",
                a,
                b,
                conjugate_of_product,
                product_of_conjugates
            );
            return Ok(false);
        }
    }
    Ok(true)
}

/// The right coset `{ d ∘ t | d ∈ D }` of some transformer `t`
#[derive(Debug, Clone)]
pub struct Coset {
    pub transformer: PermBuf,
    /// In the same order as the elements of `D`
    pub elements: Vec<PermBuf>,
}

/// The conjugate `{ t⁻¹ ∘ d ∘ t | d ∈ D }` of `D` by some transformer `t`
#[derive(Debug, Clone)]
pub struct Conjugate {
    pub transformer: PermBuf,
    pub elements: Vec<PermBuf>,
    /// `true` if `elements` is closed under composition
    pub is_group: bool,
}

/// A group generated by conjugating the generators of `D`, along with every transformer which
/// produces it
#[derive(Debug, Clone)]
pub struct ConjugateGroup {
    pub elements: GroupSet<SymmetricGroup>,
    pub transformers: Vec<PermBuf>,
}

/// The results of running a [`Scenario`]
#[derive(Debug, Clone)]
pub struct ScenarioReport {
    pub name: Option<String>,
    pub group: SymmetricGroup,
    pub generators: Vec<PermBuf>,
    /// The subgroup `D`
    pub subgroup: GroupSet<SymmetricGroup>,
    pub cosets: Vec<Coset>,
    /// `true` if the cosets contain every permutation of the scenario's [`Degree`]
    pub cosets_cover_group: bool,
    pub conjugates: Vec<Conjugate>,
    /// Sorted by size, then by elements
    pub conjugate_groups: Vec<ConjugateGroup>,
    /// The transformer checked for preserving composition, and the result of that check
    pub preserves_composition: Option<(PermBuf, bool)>,
}

impl ScenarioReport {
    pub fn write_to(&self, out: &mut String) -> std::fmt::Result {
        let degree = self.group.degree();
        let heading = match &self.name {
            Some(name) => format!("=== {} ({}) ===", name, degree),
            None => format!("=== Scenario ({}) ===", degree),
        };
        writeln!(out, "{}", heading.bold())?;
        writeln!(out, "Generators: {}", self.generators.iter().join(", "))?;
        writeln!(out, "D has {} elements:", self.subgroup.len())?;
        write_elements(out, &self.group, &self.subgroup)?;

        for (i, coset) in self.cosets.iter().enumerate() {
            writeln!(out, "M{} := {{ x | d ∈ D, x = d * {} }}", i, coset.transformer)?;
            write_elements(out, &self.group, &coset.elements)?;
        }
        if !self.cosets.is_empty() {
            let num_perms = degree
                .num_perms()
                .map_or_else(|| "too many".to_owned(), |n| n.to_string());
            let msg = format!("the cosets cover all {} permutations", num_perms);
            if self.cosets_cover_group {
                writeln!(out, "{}", msg.green())?;
            } else {
                writeln!(out, "{}", format!("Not all of {}", msg).red())?;
            }
        }

        for (i, conjugate) in self.conjugates.iter().enumerate() {
            let verdict = if conjugate.is_group {
                "is a group".green()
            } else {
                "is not a group".red()
            };
            writeln!(
                out,
                "V{} := {{ x | d ∈ D, x = t⁻¹ * d * t }} with t = {}: {}",
                i, conjugate.transformer, verdict
            )?;
            write_elements(out, &self.group, &conjugate.elements)?;
        }

        if !self.conjugate_groups.is_empty() {
            writeln!(
                out,
                "Conjugating the generators by every coset element gives {} distinct groups:",
                self.conjugate_groups.len()
            )?;
            for group in &self.conjugate_groups {
                writeln!(
                    out,
                    "{} elements, from {}:",
                    group.elements.len(),
                    group.transformers.iter().join(", ")
                )?;
                write_elements(out, &self.group, &group.elements)?;
            }
        }

        if let Some((t, preserved)) = &self.preserves_composition {
            let verdict = if *preserved {
                "same".green()
            } else {
                "not same".red()
            };
            writeln!(
                out,
                "Conjugating by {} then composing vs. composing then conjugating: {}",
                t, verdict
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use permframe::{Group, PermBuf};

    use super::Scenario;

    fn perm(s: &str) -> PermBuf {
        PermBuf::parse(s).unwrap()
    }

    #[test]
    fn demo_scenario() {
        let report = Scenario::demo().unwrap().run().unwrap();
        assert_eq!(report.subgroup.len(), 8);
        assert!(report.group.is_subgroup(&report.subgroup));

        // Three cosets of 8 elements each cover all 24 permutations
        assert_eq!(report.cosets.len(), 3);
        assert!(report.cosets.iter().all(|c| c.elements.len() == 8));
        assert!(report.cosets_cover_group);
        // The identity transformer's coset is `D` itself
        let identity_coset = &report.cosets[2];
        assert!(identity_coset
            .elements
            .iter()
            .eq(report.subgroup.iter()));

        // Conjugates of a group are always groups
        assert!(report.conjugates.iter().all(|c| c.is_group));
        // D is not normal in S4, so it has 3 distinct conjugates
        assert_eq!(report.conjugate_groups.len(), 3);
        for group in &report.conjugate_groups {
            assert_eq!(group.elements.len(), 8);
            assert_eq!(group.transformers.len(), 8);
        }
        assert_eq!(report.preserves_composition, Some((perm("ADBC"), true)));
    }

    #[test]
    fn coset_elements() {
        let report = Scenario::demo().unwrap().run().unwrap();
        let coset = &report.cosets[0];
        assert_eq!(coset.transformer, perm("ADBC"));
        for (d, x) in report.subgroup.iter().zip(&coset.elements) {
            assert_eq!(*x, d.try_compose(&coset.transformer).unwrap());
        }
    }

    #[test]
    fn normal_subgroup() {
        // The Klein four-group is normal in S4, so every conjugate is the same group
        let scenario = Scenario::from_toml(
            r#"
            generators = ["BADC", "CDAB"]
            transformers = ["ADBC", "BACD"]
            "#,
        )
        .unwrap();
        let report = scenario.run().unwrap();
        assert_eq!(report.subgroup.len(), 4);
        assert!(!report.cosets_cover_group);
        assert_eq!(report.conjugate_groups.len(), 1);
        assert_eq!(report.conjugate_groups[0].elements, report.subgroup);
        for conjugate in &report.conjugates {
            let mut elements = conjugate.elements.clone();
            elements.sort();
            assert!(elements.iter().eq(report.subgroup.iter()));
        }
    }

    #[test]
    fn no_transformers() {
        let scenario = Scenario::from_toml(r#"generators = ["BCA"]"#).unwrap();
        let report = scenario.run().unwrap();
        assert_eq!(report.subgroup.len(), 3);
        assert!(report.cosets.is_empty());
        assert!(report.conjugate_groups.is_empty());
        assert_eq!(report.preserves_composition, None);
    }

    #[test]
    fn invalid_scenarios() {
        #[track_caller]
        fn check_err(toml: &str, exp_msg: &str) {
            let err = Scenario::from_toml(toml).unwrap_err().to_string();
            assert!(err.contains(exp_msg), "{:?} doesn't contain {:?}", err, exp_msg);
        }

        check_err("generators = []", "at least one generator");
        check_err(
            r#"generators = ["BCA", "BA"]"#,
            "Can't use BA in this scenario",
        );
        check_err(
            r#"
            generators = ["BCA"]
            transformers = ["ABCD"]
            "#,
            "Can't use ABCD",
        );
        check_err(r#"generators = ["BCB"]"#, "Error parsing scenario file");
        check_err(
            r#"
            generators = ["BCA"]
            transfomers = ["ABC"]
            "#,
            "unknown field",
        );
    }

    #[test]
    fn report_text() {
        colored::control::set_override(false);
        let report = Scenario::demo().unwrap().run().unwrap();
        let mut out = String::new();
        report.write_to(&mut out).unwrap();
        assert!(out.starts_with("=== D4 (4 points) ===\n"));
        assert!(out.contains("Generators: BCDA, BADC\n"));
        assert!(out.contains(" 0: ABCD - (A)(B)(C)(D)\n"));
        assert!(out.contains("M0 := { x | d ∈ D, x = d * ADBC }\n"));
        assert!(out.contains("the cosets cover all 24 permutations\n"));
        assert!(!out.contains("is not a group"));
        assert!(out.contains("gives 3 distinct groups"));
        assert!(out.ends_with(": same\n"));
    }
}
