//! Interactive clause menu.
//!
//! Walks section → sub-section → clause, collects the inputs of the chosen
//! check and returns it without evaluating it.

use std::io::{BufRead, Write};

use anyhow::{bail, Result};

use o86_core::calculations::fire::{FaceProtection, FireProduct, FireSectionInput};
use o86_core::calculations::general::{CrossSectionInput, LimitStateInput};
use o86_core::calculations::sawn_lumber::{
    AxialLoad, BendingInput, CombinedInput, CompAngleInput, CompParallelInput, CompPerpInput, Connectors,
    EndConditions, LateralSupport, MemberCheck, MemberInput, Resistances, ShearInput, TensionInput,
};
use o86_core::calculations::serviceability::{
    DeflectionInput, DeflectionKind, ElasticityInput, GrainDirection, LateralBraceInput, MoistureInput,
    PondingInput,
};
use o86_core::calculations::vibration::{FloorParameters, FloorSystem, FloorVibrationInput};
use o86_core::calculations::{CalculationItem, CategoryInput, FactorsInput, LoadDurationInput, StrengthsInput};
use o86_core::factors::{DurationLoads, FactorConditions, LoadDuration, StrengthProperty};
use o86_core::materials::lumber_sizes::{Seasoning, Surfacing};
use o86_core::materials::sawn_lumber::lumber_category;
use o86_core::materials::{LumberCategory, SpeciesGroup, Topping};
use o86_core::AppConfig;

use crate::prompt::Prompter;

/// What the user asked for
#[derive(Debug, Clone)]
pub enum Selection {
    Check(CalculationItem),
    /// 6.5.2 net dimension lookup
    NetSize {
        nominal: u32,
        seasoning: Seasoning,
        surfacing: Surfacing,
    },
}

pub fn run<R: BufRead, W: Write>(p: &mut Prompter<R, W>, config: &AppConfig) -> Result<Selection> {
    p.say("")?;
    p.say("CSA O86:19 Engineering design in wood")?;
    p.say("    5  General design")?;
    p.say("    6  Sawn lumber")?;
    p.say("")?;

    let section = p.text("Section: ")?;
    match section.as_str() {
        "5" => section_5(p, config),
        "6" => section_6(p),
        other => bail!("unknown section '{other}'"),
    }
}

// ============================================================================
// Section 5
// ============================================================================

fn section_5<R: BufRead, W: Write>(p: &mut Prompter<R, W>, config: &AppConfig) -> Result<Selection> {
    p.say("    5.1 Limit states design")?;
    p.say("    5.3 Conditions and factors affecting resistance")?;
    p.say("    5.4 Serviceability requirements")?;
    p.say("    5.5 Lateral bracing of truss compression webs")?;
    p.say("    5.6 Fire resistance")?;
    p.say("")?;

    let sub = p.text("Sub-section: 5.")?;
    let item = match sub.as_str() {
        "1" => CalculationItem::LimitStates(LimitStateInput {
            load: p.number("\tFactored or specified load = ")?,
            resistance: p.number("\tCorresponding resistance = ")?,
        }),
        "3" => clause_5_3(p)?,
        "4" => clause_5_4(p, config)?,
        "5" => CalculationItem::LateralBrace(LateralBraceInput {
            force_kn: p.number("\tCompression force, kN = ")?,
        }),
        "6" => fire_section(p)?,
        other => bail!("unknown sub-section 5.{other}"),
    };
    Ok(Selection::Check(item))
}

fn clause_5_3<R: BufRead, W: Write>(p: &mut Prompter<R, W>) -> Result<CalculationItem> {
    p.say("    5.3.2 Load duration factor, Kd")?;
    p.say("    5.3.8 Cross-section check")?;
    p.say("")?;

    match p.text("Clause: 5.3.")?.as_str() {
        "2" => {
            let (duration, loads) = load_duration(p)?;
            Ok(CalculationItem::LoadDuration(LoadDurationInput { duration, loads }))
        }
        "8" => {
            let gross = p.number("\tGross section = ")?;
            let net = p.number("\tNet section = ")?;
            Ok(CalculationItem::CrossSection(CrossSectionInput { net, gross }))
        }
        other => bail!("unknown clause 5.3.{other}"),
    }
}

/// Load duration with its continuous loads. An empty answer means normal.
fn load_duration<R: BufRead, W: Write>(p: &mut Prompter<R, W>) -> Result<(LoadDuration, DurationLoads)> {
    let raw = p.text("\tLoad duration (short 's', normal 'n' or continuous 'c') [n] = ")?;
    let duration = if raw.is_empty() {
        LoadDuration::Normal
    } else {
        LoadDuration::from_str_flexible(&raw)?
    };

    let mut loads = DurationLoads::default();
    if duration == LoadDuration::Continuous {
        loads.dead = p.number_or("\tContinuous load [0] = ", 0.0)?;
        loads.live = p.number_or("\tStandard-term live load [0] = ", 0.0)?;
        loads.snow = p.number_or("\tSnow load [0] = ", 0.0)?;
    }
    Ok((duration, loads))
}

fn clause_5_4<R: BufRead, W: Write>(p: &mut Prompter<R, W>, config: &AppConfig) -> Result<CalculationItem> {
    p.say("    5.4.1 Modulus of elasticity")?;
    p.say("    5.4.2 Elastic deflection")?;
    p.say("    5.4.3 Permanent deformation")?;
    p.say("    5.4.4 Ponding")?;
    p.say("    5.4.5 Vibration")?;
    p.say("    5.4.6 Building movement due to moisture content change")?;
    p.say("")?;

    let item = match p.text("Clause: 5.4.")?.as_str() {
        "1" => CalculationItem::Elasticity(ElasticityInput {
            modulus: p.number("\tSpecified modulus of elasticity, MPa = ")?,
            service: p.number("\tService condition factor = ")?,
            treatment: p.number("\tTreatment factor = ")?,
        }),
        "2" => deflection(p, DeflectionKind::Elastic)?,
        "3" => deflection(p, DeflectionKind::Permanent)?,
        "4" => {
            let load_kpa = p.number("\tTotal specified uniform load, kPa = ")?;
            let raw = p.text("\tSystem deflections, mm (separated by spaces) = ")?;
            let deflections_mm = raw
                .split(|c: char| c.is_whitespace() || c == ';')
                .filter(|s| !s.is_empty())
                .map(crate::prompt::parse_number)
                .collect::<Result<Vec<_>>>()?;
            CalculationItem::Ponding(PondingInput { load_kpa, deflections_mm })
        }
        "5" => vibration(p, config)?,
        "6" => moisture(p)?,
        other => bail!("unknown clause 5.4.{other}"),
    };
    Ok(item)
}

fn deflection<R: BufRead, W: Write>(p: &mut Prompter<R, W>, kind: DeflectionKind) -> Result<CalculationItem> {
    Ok(CalculationItem::Deflection(DeflectionInput {
        kind,
        span_mm: p.number("\tSpan, mm = ")?,
        deflection_mm: p.number("\tDeflection, mm = ")?,
    }))
}

fn vibration<R: BufRead, W: Write>(p: &mut Prompter<R, W>, config: &AppConfig) -> Result<CalculationItem> {
    let span_m = p.number("\tFloor span, m = ")?;
    let multiple_span = p.yes_no("\tMultiple spans? (y/n) = ")?;
    let clt = p.yes_no("\tCLT floor? (y/n) = ")?;

    let mut params = FloorParameters::default();
    let topping_label;
    if clt {
        params.clt_mass = p.number("\tCLT linear mass, kg/m = ")?;
        params.clt_bending_stiffness = p.number("\t(EI)eff,f, N*mm2 = ")?;
        topping_label = "\tTopping ('concrete' or 'none') = ";
    } else {
        params.joist_spacing_m = Some(p.number_or(
            &format!("\tJoist spacing, m [{}] = ", config.default_joist_spacing_m),
            config.default_joist_spacing_m,
        )?);
        params.joist_depth_m = p.number("\tJoist depth, m = ")?;
        params.joist_mass = p.number("\tJoist mass per unit length, kg/m = ")?;
        params.joist_bending_stiffness = p.number("\tEI joist, N*m2 = ")?;
        params.joist_axial_stiffness = p.number("\tEA joist, N = ")?;
        params.bracing = p.yes_no("\tLateral bracing? (y/n) = ")?;
        params.gypsum = p.yes_no("\tGypsum board under joists? (y/n) = ")?;

        let subfloor = p.text(&format!("\tSubfloor [{}] = ", config.default_subfloor))?;
        params.subfloor = if subfloor.is_empty() {
            config.default_subfloor.clone()
        } else {
            subfloor
        };
        params.glued = p.yes_no("\tGlued subfloor? (y/n) = ")?;
        topping_label = "\tTopping ('concrete', 'none' or a panel) = ";
    }

    let raw = p.text(topping_label)?;
    let mut topping = Topping::from_str_flexible(&raw, 0.0)?;
    if topping.is_concrete() {
        topping = Topping::Concrete {
            thickness_m: p.number("\tTopping thickness, m = ")?,
        };
    } else if clt && !topping.is_none() {
        bail!("a CLT floor takes a concrete topping or none, not '{raw}'");
    }

    Ok(CalculationItem::Vibration(FloorVibrationInput {
        span_m,
        multiple_span,
        topping,
        system: FloorSystem::from_parameters(&params),
    }))
}

fn moisture<R: BufRead, W: Write>(p: &mut Prompter<R, W>) -> Result<CalculationItem> {
    let dimension_mm = p.number("\tActual dimension, mm = ")?;
    let initial_mc = p.number("\tInitial moisture content, % = ")?;
    let final_mc = p.number("\tFinal moisture content, % = ")?;
    let raw = p.text("\tGrain direction ('perp', 'para' or 'other') = ")?;
    let direction = match raw.to_lowercase().as_str() {
        "perp" | "perpendicular" => GrainDirection::Perpendicular,
        "para" | "parallel" => GrainDirection::Parallel,
        _ => GrainDirection::Custom(p.number("\tShrinkage coefficient = ")?),
    };
    Ok(CalculationItem::Moisture(MoistureInput {
        dimension_mm,
        initial_mc,
        final_mc,
        direction,
    }))
}

fn fire_section<R: BufRead, W: Write>(p: &mut Prompter<R, W>) -> Result<CalculationItem> {
    let duration_min = p.number("\tFire exposure, min = ")?;
    let width_mm = p.number("\tMember width, mm = ")?;
    let depth_mm = p.number("\tMember depth, mm = ")?;
    let wide_faces = FaceProtection::from_str_flexible(&p.text("\tProtected wide faces (0, 1 or 2) = ")?)?;
    let narrow_faces = FaceProtection::from_str_flexible(&p.text("\tProtected narrow faces (0, 1 or 2) = ")?)?;

    let products: Vec<_> = FireProduct::ALL.iter().map(|f| (*f, f.display_name())).collect();
    let product = p.choose("\tProduct = ", &products)?;

    Ok(CalculationItem::FireSection(FireSectionInput {
        duration_min,
        width_mm,
        depth_mm,
        wide_faces,
        narrow_faces,
        product,
    }))
}

// ============================================================================
// Section 6
// ============================================================================

fn section_6<R: BufRead, W: Write>(p: &mut Prompter<R, W>) -> Result<Selection> {
    p.say("    6.2 Materials")?;
    p.say("    6.3 Specified strengths and moduli of elasticity")?;
    p.say("    6.4 Modification factors")?;
    p.say("    6.5 Strength and resistance")?;
    p.say("")?;

    let item = match p.text("Sub-section: 6.")?.as_str() {
        "2" => CalculationItem::LumberCategory(CategoryInput {
            width_mm: p.number("\tMember width, mm = ")?,
            depth_mm: p.number("\tMember depth, mm = ")?,
            msr: p.yes_no("\tMSR lumber? (y/n) = ")?,
            mel: p.yes_no("\tMEL lumber? (y/n) = ")?,
        }),
        "3" => strengths(p)?,
        "4" => factors(p)?,
        "5" => return clause_6_5(p),
        other => bail!("unknown sub-section 6.{other}"),
    };
    Ok(Selection::Check(item))
}

fn strengths<R: BufRead, W: Write>(p: &mut Prompter<R, W>) -> Result<CalculationItem> {
    let category =
        LumberCategory::from_str_flexible(&p.text("\tCategory ('Lumber', 'Light', 'Beam', 'Post', 'MSR' or 'MEL') = ")?)?;

    let (species, grade) = if category.is_machine_graded() {
        let label = if category == LumberCategory::Msr {
            "\tGrade, see table 6.8 (1200Fb-1.2E = '1200-1.2') = "
        } else {
            "\tGrade, see table 6.9 (M-10 = 'm-10') = "
        };
        (SpeciesGroup::DouglasFirLarch, p.text(label)?)
    } else {
        let species = SpeciesGroup::from_str_flexible(&p.text("\tSpecies group ('df', 'hf', 'spf' or 'ns') = ")?)?;
        let label = match category {
            LumberCategory::Lumber => "\tGrade ('ss', 'n1-n2' or 'n3-stud') = ",
            LumberCategory::Light => "\tGrade ('cst' or 'std') = ",
            _ => "\tGrade ('ss', 'n1' or 'n2') = ",
        };
        (species, p.text(label)?)
    };

    let wide_face_loading = category == LumberCategory::Beam && p.yes_no("\tLoads applied to the wide face? (y/n) = ")?;

    Ok(CalculationItem::SpecifiedStrengths(StrengthsInput {
        category,
        species,
        grade,
        wide_face_loading,
    }))
}

fn factors<R: BufRead, W: Write>(p: &mut Prompter<R, W>) -> Result<CalculationItem> {
    let width_mm = p.number("\tMember width, mm = ")?;
    let depth_mm = p.number("\tMember depth, mm = ")?;
    let property = StrengthProperty::from_str_flexible(
        &p.text("\tProperty ('flex', 'cis_f', 'cis_v', 'comp_para', 'comp_perp', 'trac' or 'moe') = ")?,
    )?;
    let (duration, loads) = load_duration(p)?;
    let msr = p.yes_no("\tMSR lumber? (y/n) = ")?;
    let mel = p.yes_no("\tMEL lumber? (y/n) = ")?;
    let category = lumber_category(width_mm, depth_mm, msr, mel)?;

    let wet = p.yes_no("\tWet service conditions? (y/n) = ")?;
    let treated = p.yes_no("\tTreated lumber? (y/n) = ")?;
    let incised = treated && p.yes_no("\tIncised lumber? (y/n) = ")?;
    let spacing_610 = p.yes_no("\tSpacing not over 610 mm? (y/n) = ")?;
    let connected = spacing_610 && p.yes_no("\tSubfloor fastened? (y/n) = ")?;
    let built_up = p.yes_no("\tBuilt-up beam? (y/n) = ")?;

    let conditions = FactorConditions::new()
        .with_duration(duration, loads)
        .with_wet_service(wet)
        .with_treatment(treated, incised)
        .with_system(spacing_610, connected, built_up);

    Ok(CalculationItem::ModificationFactors(FactorsInput {
        width_mm,
        depth_mm,
        property,
        category,
        conditions,
    }))
}

fn clause_6_5<R: BufRead, W: Write>(p: &mut Prompter<R, W>) -> Result<Selection> {
    p.say("    6.5.2 Sizes")?;
    p.say("    6.5.3 Bending moment resistance")?;
    p.say("    6.5.4 Shear resistance")?;
    p.say("    6.5.5 Compressive resistance parallel to grain")?;
    p.say("    6.5.6 Compressive resistance perpendicular to grain")?;
    p.say("    6.5.7 Compressive resistance at an angle to grain")?;
    p.say("    6.5.8 Tensile resistance parallel to grain")?;
    p.say("    6.5.9 Resistance to combined bending and axial load")?;
    p.say("")?;

    let clause = p.text("Clause: 6.5.")?;
    if clause == "2" {
        let nominal = p.number("\tNominal dimension, in = ")?;
        if nominal <= 0.0 || nominal.fract() != 0.0 {
            bail!("nominal dimension must be a whole number of inches, got {nominal}");
        }
        let green = p.yes_no("\tGreen lumber (moisture content > 19%)? (y/n) = ")?;
        let rough = p.yes_no("\tRough dimensions? (y/n) = ")?;
        return Ok(Selection::NetSize {
            nominal: nominal as u32,
            seasoning: if green { Seasoning::Green } else { Seasoning::Dry },
            surfacing: if rough { Surfacing::Rough } else { Surfacing::Dressed },
        });
    }

    if !matches!(clause.as_str(), "3" | "4" | "5" | "6" | "7" | "8" | "9") {
        bail!("unknown clause 6.5.{clause}");
    }

    let member = member(p)?;
    let check = match clause.as_str() {
        "3" => bending(p)?,
        "4" => shear(p)?,
        "5" => comp_parallel(p, member.ply)?,
        "6" => comp_perpendicular(p)?,
        "7" => MemberCheck::CompressionAngle(CompAngleInput {
            pr: p.number("\tPr, N = ")?,
            qr: p.number("\tQr, N = ")?,
            angle_deg: p.number("\tAngle between load and grain, deg = ")?,
        }),
        "8" => MemberCheck::Tension(TensionInput {
            ft: p.number("\tft, MPa = ")?,
            kst: p.number_or("\tKst [1] = ", 1.0)?,
            kzt: p.number_or("\tKzt [1] = ", 1.0)?,
            net_area: p.maybe_number("\tNet area, mm2 [gross] = ")?,
        }),
        _ => combined(p)?,
    };

    Ok(Selection::Check(CalculationItem::SawnLumber(MemberInput { member, check })))
}

fn member<R: BufRead, W: Write>(p: &mut Prompter<R, W>) -> Result<Resistances> {
    let b = p.number("\tPly width b, mm = ")?;
    let d = p.number("\tDepth d, mm = ")?;
    let ply = p.number_or("\tNumber of plies [1] = ", 1.0)?;
    if ply < 1.0 || ply.fract() != 0.0 {
        bail!("number of plies must be a positive whole number, got {ply}");
    }
    let kd = p.number_or("\tKd [1] = ", 1.0)?;
    let kh = p.number_or("\tKh [1] = ", 1.0)?;
    let kt = p.number_or("\tKt [1] = ", 1.0)?;
    Ok(Resistances::new(b, d).with_factors(kd, kh, kt).with_ply(ply as u32))
}

fn bending<R: BufRead, W: Write>(p: &mut Prompter<R, W>) -> Result<MemberCheck> {
    let fb = p.number("\tfb, MPa = ")?;
    let ksb = p.number_or("\tKsb [1] = ", 1.0)?;
    let kzb = p.number_or("\tKzb [1] = ", 1.0)?;
    let supports: Vec<_> = LateralSupport::ALL.iter().map(|s| (*s, s.display_name())).collect();
    let support = p.choose("\tLateral support = ", &supports)?;
    let kl = p.maybe_number("\tKL when d/b exceeds the limit [none] = ")?;
    Ok(MemberCheck::Bending(BendingInput {
        fb,
        ksb,
        kzb,
        support,
        kl,
    }))
}

fn shear<R: BufRead, W: Write>(p: &mut Prompter<R, W>) -> Result<MemberCheck> {
    let mut input = ShearInput {
        fv: p.number("\tfv, MPa = ")?,
        ksv: p.number_or("\tKsv [1] = ", 1.0)?,
        kzv: p.number_or("\tKzv [1] = ", 1.0)?,
        ..ShearInput::default()
    };
    input.notch_depth = p.number_or("\tNotch depth, mm [0] = ", 0.0)?;
    if input.notch_depth > 0.0 {
        input.notch_length = p.number("\tNotch length, mm = ")?;
        input.ksf = p.number_or("\tKsf [1] = ", 1.0)?;
    }
    Ok(MemberCheck::Shear(input))
}

fn comp_parallel<R: BufRead, W: Write>(p: &mut Prompter<R, W>, ply: u32) -> Result<MemberCheck> {
    let mut input = CompParallelInput {
        length_b: p.number("\tUnsupported length, weak axis, mm = ")?,
        length_d: p.number("\tUnsupported length, strong axis, mm = ")?,
        fc: p.number("\tfc, MPa = ")?,
        e05: p.number("\tE05, MPa = ")?,
        ksc: p.number_or("\tKsc [1] = ", 1.0)?,
        kse: p.number_or("\tKsE [1] = ", 1.0)?,
        ..CompParallelInput::default()
    };

    let sway = p.yes_no("\tOne end free to translate? (y/n) = ")?;
    let free_rotations = p.choose(
        "\tEnds free to rotate = ",
        &[(0u8, "None"), (1, "One"), (2, "Both")],
    )?;
    input.ends = EndConditions { sway, free_rotations };

    if ply > 1 {
        input.connectors =
            Connectors::from_str_flexible(&p.text("\tPly fasteners ('nails', 'bolts', 'rings' or 'none') = ")?)?;
        input.spacers = p.yes_no("\tPlies separated by spacer blocks? (y/n) = ")?;
    }
    Ok(MemberCheck::CompressionParallel(input))
}

fn comp_perpendicular<R: BufRead, W: Write>(p: &mut Prompter<R, W>) -> Result<MemberCheck> {
    let relative_density = p.maybe_number("\tRelative density G [table fcp] = ")?;
    let fcp = match relative_density {
        Some(_) => 0.0,
        None => p.number("\tfcp, MPa = ")?,
    };
    Ok(MemberCheck::CompressionPerpendicular(CompPerpInput {
        fcp,
        relative_density,
        kscp: p.number_or("\tKscp [1] = ", 1.0)?,
        bearing_length: p.number("\tBearing length, mm = ")?,
        end_distance: p.number("\tDistance from member end to bearing centre, mm = ")?,
        opposite_length: p.number_or("\tBearing length on the opposite face, mm [0] = ", 0.0)?,
        opposite_offset: p.number_or("\tOffset between the bearings, mm [0] = ", 0.0)?,
    }))
}

fn combined<R: BufRead, W: Write>(p: &mut Prompter<R, W>) -> Result<MemberCheck> {
    let mf = p.number("\tMf, N*mm = ")?;
    let mr = p.number("\tMr, N*mm = ")?;
    let axial = if p.yes_no("\tAxial compression? (y/n) = ")? {
        AxialLoad::Compression {
            pf: p.number("\tPf, N = ")?,
            pr: p.number("\tPr, N = ")?,
            e05: p.number("\tE05, MPa = ")?,
            kse: p.number_or("\tKsE [1] = ", 1.0)?,
            effective_length: p.number("\tEffective length about the bending axis, mm = ")?,
        }
    } else {
        AxialLoad::Tension {
            tf: p.number("\tTf, N = ")?,
            tr: p.number("\tTr, N = ")?,
        }
    };
    Ok(MemberCheck::Combined(CombinedInput { mf, mr, axial }))
}
