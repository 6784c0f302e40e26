//! Core data models for Sajuvise
//!
//! These models are used throughout the codebase for representing
//! stems, branches, pillars, charts, and analysis results.

use serde::{Deserialize, Serialize};

/// The five elements (오행) of the sexagenary system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Wood,
    Fire,
    Earth,
    Metal,
    Water,
}

impl Element {
    pub const ALL: [Element; 5] = [
        Element::Wood,
        Element::Fire,
        Element::Earth,
        Element::Metal,
        Element::Water,
    ];

    /// The element this one generates (상생 cycle).
    pub fn generates(self) -> Element {
        match self {
            Element::Wood => Element::Fire,
            Element::Fire => Element::Earth,
            Element::Earth => Element::Metal,
            Element::Metal => Element::Water,
            Element::Water => Element::Wood,
        }
    }

    /// The element this one controls (상극 cycle).
    pub fn controls(self) -> Element {
        match self {
            Element::Wood => Element::Earth,
            Element::Earth => Element::Water,
            Element::Water => Element::Fire,
            Element::Fire => Element::Metal,
            Element::Metal => Element::Wood,
        }
    }

    pub fn korean(self) -> &'static str {
        match self {
            Element::Wood => "목",
            Element::Fire => "화",
            Element::Earth => "토",
            Element::Metal => "금",
            Element::Water => "수",
        }
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Element::Wood => write!(f, "wood"),
            Element::Fire => write!(f, "fire"),
            Element::Earth => write!(f, "earth"),
            Element::Metal => write!(f, "metal"),
            Element::Water => write!(f, "water"),
        }
    }
}

/// Yin/yang polarity (음양).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YinYang {
    Yang,
    Yin,
}

/// The ten heavenly stems (천간), in cycle order 甲..癸.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stem {
    Gap,    // 甲
    Eul,    // 乙
    Byeong, // 丙
    Jeong,  // 丁
    Mu,     // 戊
    Gi,     // 己
    Gyeong, // 庚
    Shin,   // 辛
    Im,     // 壬
    Gye,    // 癸
}

impl Stem {
    pub const ALL: [Stem; 10] = [
        Stem::Gap,
        Stem::Eul,
        Stem::Byeong,
        Stem::Jeong,
        Stem::Mu,
        Stem::Gi,
        Stem::Gyeong,
        Stem::Shin,
        Stem::Im,
        Stem::Gye,
    ];

    /// Stem at `index % 10` in the cycle.
    pub fn from_index(index: usize) -> Stem {
        Self::ALL[index % 10]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn element(self) -> Element {
        match self {
            Stem::Gap | Stem::Eul => Element::Wood,
            Stem::Byeong | Stem::Jeong => Element::Fire,
            Stem::Mu | Stem::Gi => Element::Earth,
            Stem::Gyeong | Stem::Shin => Element::Metal,
            Stem::Im | Stem::Gye => Element::Water,
        }
    }

    /// Even cycle positions are yang, odd are yin.
    pub fn yin_yang(self) -> YinYang {
        if self.index() % 2 == 0 {
            YinYang::Yang
        } else {
            YinYang::Yin
        }
    }

    pub fn hanja(self) -> &'static str {
        ["甲", "乙", "丙", "丁", "戊", "己", "庚", "辛", "壬", "癸"][self.index()]
    }

    pub fn korean(self) -> &'static str {
        ["갑", "을", "병", "정", "무", "기", "경", "신", "임", "계"][self.index()]
    }
}

impl std::fmt::Display for Stem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.hanja())
    }
}

/// The twelve earthly branches (지지), in cycle order 子..亥.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Branch {
    Ja,   // 子
    Chuk, // 丑
    In,   // 寅
    Myo,  // 卯
    Jin,  // 辰
    Sa,   // 巳
    O,    // 午
    Mi,   // 未
    Sin,  // 申
    Yu,   // 酉
    Sul,  // 戌
    Hae,  // 亥
}

impl Branch {
    pub const ALL: [Branch; 12] = [
        Branch::Ja,
        Branch::Chuk,
        Branch::In,
        Branch::Myo,
        Branch::Jin,
        Branch::Sa,
        Branch::O,
        Branch::Mi,
        Branch::Sin,
        Branch::Yu,
        Branch::Sul,
        Branch::Hae,
    ];

    /// Branch at `index % 12` in the cycle.
    pub fn from_index(index: usize) -> Branch {
        Self::ALL[index % 12]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn element(self) -> Element {
        match self {
            Branch::Ja | Branch::Hae => Element::Water,
            Branch::Chuk | Branch::Jin | Branch::Mi | Branch::Sul => Element::Earth,
            Branch::In | Branch::Myo => Element::Wood,
            Branch::Sa | Branch::O => Element::Fire,
            Branch::Sin | Branch::Yu => Element::Metal,
        }
    }

    pub fn yin_yang(self) -> YinYang {
        if self.index() % 2 == 0 {
            YinYang::Yang
        } else {
            YinYang::Yin
        }
    }

    pub fn hanja(self) -> &'static str {
        ["子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥"][self.index()]
    }

    pub fn korean(self) -> &'static str {
        ["자", "축", "인", "묘", "진", "사", "오", "미", "신", "유", "술", "해"][self.index()]
    }
}

impl std::fmt::Display for Branch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.hanja())
    }
}

/// The ten gods (십신): a stem/branch element classified against the day master.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sibsin {
    BiGyeon,   // 비견
    GeopJae,   // 겁재
    SikSin,    // 식신
    SangGwan,  // 상관
    PyeonJae,  // 편재
    JeongJae,  // 정재
    PyeonGwan, // 편관
    JeongGwan, // 정관
    PyeonIn,   // 편인
    JeongIn,   // 정인
}

impl Sibsin {
    pub fn korean(self) -> &'static str {
        match self {
            Sibsin::BiGyeon => "비견",
            Sibsin::GeopJae => "겁재",
            Sibsin::SikSin => "식신",
            Sibsin::SangGwan => "상관",
            Sibsin::PyeonJae => "편재",
            Sibsin::JeongJae => "정재",
            Sibsin::PyeonGwan => "편관",
            Sibsin::JeongGwan => "정관",
            Sibsin::PyeonIn => "편인",
            Sibsin::JeongIn => "정인",
        }
    }
}

/// Structural chart pattern (격국).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Geokguk {
    BiGyeon,
    GeopJae,
    SikSin,
    SangGwan,
    PyeonJae,
    JeongJae,
    PyeonGwan,
    JeongGwan,
    PyeonIn,
    JeongIn,
    GeonRok,
    YangIn,
}

impl Geokguk {
    pub fn korean(self) -> &'static str {
        match self {
            Geokguk::BiGyeon => "비견격",
            Geokguk::GeopJae => "겁재격",
            Geokguk::SikSin => "식신격",
            Geokguk::SangGwan => "상관격",
            Geokguk::PyeonJae => "편재격",
            Geokguk::JeongJae => "정재격",
            Geokguk::PyeonGwan => "편관격",
            Geokguk::JeongGwan => "정관격",
            Geokguk::PyeonIn => "편인격",
            Geokguk::JeongIn => "정인격",
            Geokguk::GeonRok => "건록격",
            Geokguk::YangIn => "양인격",
        }
    }
}

/// Twelve life stages (십이운성) of a stem over the branch cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifeStage {
    JangSaeng, // 장생
    MokYok,    // 목욕
    GwanDae,   // 관대
    GeonRok,   // 건록
    JeWang,    // 제왕
    Soe,       // 쇠
    Byeong,    // 병
    Sa,        // 사
    Myo,       // 묘
    Jeol,      // 절
    Tae,       // 태
    Yang,      // 양
}

/// Life event categories the bonus engine scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Marriage,
    Investment,
    Move,
    JobChange,
    BusinessOpen,
    Exam,
    Travel,
}

impl EventType {
    pub const ALL: [EventType; 7] = [
        EventType::Marriage,
        EventType::Investment,
        EventType::Move,
        EventType::JobChange,
        EventType::BusinessOpen,
        EventType::Exam,
        EventType::Travel,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EventType::Marriage => "marriage",
            EventType::Investment => "investment",
            EventType::Move => "move",
            EventType::JobChange => "job change",
            EventType::BusinessOpen => "business opening",
            EventType::Exam => "exam",
            EventType::Travel => "travel",
        }
    }
}

/// Birth gender, used for daeun direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

/// Calendar system of the birth date input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarType {
    #[default]
    Solar,
    Lunar,
}

/// Raw birth input as shaped by the caller (web layer validates structure,
/// the engine validates content).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BirthDescriptor {
    /// Birth date, `YYYY-MM-DD`.
    pub date: String,
    /// Birth time, `HH:MM`. None means the hour pillar carries no sibsin.
    #[serde(default)]
    pub time: Option<String>,
    pub gender: Gender,
    #[serde(default)]
    pub calendar: CalendarType,
    /// Leap-month flag, only meaningful for lunar input.
    #[serde(default)]
    pub leap_month: bool,
    /// IANA timezone name, e.g. `Asia/Seoul`.
    pub timezone: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

/// Pillar position within the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PillarPosition {
    Year,
    Month,
    Day,
    Hour,
}

impl PillarPosition {
    pub const ALL: [PillarPosition; 4] = [
        PillarPosition::Year,
        PillarPosition::Month,
        PillarPosition::Day,
        PillarPosition::Hour,
    ];
}

/// One side of a pillar: the heavenly stem with its derived tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StemInfo {
    pub stem: Stem,
    pub element: Element,
    pub yin_yang: YinYang,
    /// None only for the day master itself and for the zero-information
    /// hour pillar when birth time is unknown.
    pub sibsin: Option<Sibsin>,
}

/// One side of a pillar: the earthly branch with its derived tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchInfo {
    pub branch: Branch,
    pub element: Element,
    pub yin_yang: YinYang,
    pub sibsin: Option<Sibsin>,
}

/// A single pillar of the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pillar {
    pub stem: StemInfo,
    pub branch: BranchInfo,
    /// Hidden stems (지장간) of the branch, principal qi last.
    pub hidden_stems: Vec<Stem>,
    pub life_stage: LifeStage,
}

impl Pillar {
    pub fn ganzhi_name(&self) -> String {
        format!("{}{}", self.stem.stem.hanja(), self.branch.branch.hanja())
    }
}

/// The four pillars, year to hour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FourPillars {
    pub year: Pillar,
    pub month: Pillar,
    pub day: Pillar,
    pub hour: Pillar,
}

impl FourPillars {
    pub fn get(&self, position: PillarPosition) -> &Pillar {
        match position {
            PillarPosition::Year => &self.year,
            PillarPosition::Month => &self.month,
            PillarPosition::Day => &self.day,
            PillarPosition::Hour => &self.hour,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (PillarPosition, &Pillar)> + '_ {
        PillarPosition::ALL.iter().map(move |&p| (p, self.get(p)))
    }
}

/// Element counts across the 8 stem/branch slots of the four pillars.
///
/// The five counts always sum to exactly 8.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiveElementCounts {
    pub wood: u8,
    pub fire: u8,
    pub earth: u8,
    pub metal: u8,
    pub water: u8,
}

impl FiveElementCounts {
    pub fn get(&self, element: Element) -> u8 {
        match element {
            Element::Wood => self.wood,
            Element::Fire => self.fire,
            Element::Earth => self.earth,
            Element::Metal => self.metal,
            Element::Water => self.water,
        }
    }

    pub fn add(&mut self, element: Element) {
        match element {
            Element::Wood => self.wood += 1,
            Element::Fire => self.fire += 1,
            Element::Earth => self.earth += 1,
            Element::Metal => self.metal += 1,
            Element::Water => self.water += 1,
        }
    }

    pub fn total(&self) -> u8 {
        self.wood + self.fire + self.earth + self.metal + self.water
    }

    /// Most represented element; ties resolve in generation-cycle order.
    pub fn dominant(&self) -> Element {
        Element::ALL
            .into_iter()
            .max_by_key(|&e| self.get(e))
            .unwrap_or(Element::Wood)
    }
}

/// One position in the 60-cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GanzhiCycle {
    pub stem: Stem,
    pub branch: Branch,
    /// Position in the sexagenary cycle, 0 (甲子) to 59 (癸亥).
    pub index: u8,
}

impl GanzhiCycle {
    /// Cycle entry at `index % 60` from the 甲子 epoch.
    pub fn from_index(index: i64) -> GanzhiCycle {
        let idx = index.rem_euclid(60) as usize;
        GanzhiCycle {
            stem: Stem::from_index(idx),
            branch: Branch::from_index(idx),
            index: idx as u8,
        }
    }

    pub fn name(&self) -> String {
        format!("{}{}", self.stem.hanja(), self.branch.hanja())
    }
}

/// Direction a daeun sequence advances through the month cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DaeunDirection {
    Forward,
    Backward,
}

/// One decade luck cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaeunCycle {
    pub stem: Stem,
    pub branch: Branch,
    pub start_age: u8,
    pub end_age: u8,
    pub sibsin: Sibsin,
}

/// One annual luck cycle (세운).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnualCycle {
    pub year: i32,
    pub stem: Stem,
    pub branch: Branch,
    pub sibsin: Sibsin,
}

/// One monthly luck cycle (월운).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyCycle {
    pub year: i32,
    pub month: u32,
    pub stem: Stem,
    pub branch: Branch,
    pub sibsin: Sibsin,
}

/// One day of the daily luck calendar (일진).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IljinEntry {
    pub day: u32,
    pub stem: Stem,
    pub branch: Branch,
    pub sibsin: Sibsin,
}

/// Complete Saju profile derived from birth input.
///
/// Pure function of the birth descriptor; computed once, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SajuProfile {
    pub pillars: FourPillars,
    pub day_master: Stem,
    pub five_element_counts: FiveElementCounts,
    pub yongsin: Vec<Element>,
    pub kisin: Vec<Element>,
    pub geokguk: Geokguk,
    pub daeun_direction: DaeunDirection,
    pub daeun_start_age: u8,
    /// Always exactly 10 cycles.
    pub daeun_cycles: Vec<DaeunCycle>,
    pub birth_year: i32,
    pub gender: Gender,
    /// True when birth time was supplied.
    pub has_birth_time: bool,
}

/// Branch relation categories (see the relation tables).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationKind {
    Samhap,
    Yukhap,
    Chung,
    Hyung,
    Hai,
}

impl RelationKind {
    /// Semantic label key resolved to display text by the localization layer.
    pub fn label_key(self) -> &'static str {
        match self {
            RelationKind::Samhap => "branchSamhap",
            RelationKind::Yukhap => "branchYukhap",
            RelationKind::Chung => "calendar.chung",
            RelationKind::Hyung => "calendar.hyung",
            RelationKind::Hai => "calendar.hai",
        }
    }
}

/// A matched branch relation. Kinds are table-driven and a single pair may
/// match several tables at once.
#[derive(Debug, Clone, Serialize)]
pub struct BranchRelation {
    pub kind: RelationKind,
    pub branches: (Branch, Branch),
    pub result_element: Option<Element>,
    pub score_delta: f64,
    pub label_key: &'static str,
}

/// A matched heavenly-stem combination (간합) between two profiles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StemCombination {
    pub stem1: Stem,
    pub stem2: Stem,
    pub pillar1: PillarPosition,
    pub pillar2: PillarPosition,
    pub result_element: Element,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_cycles() {
        assert_eq!(Element::Wood.generates(), Element::Fire);
        assert_eq!(Element::Water.generates(), Element::Wood);
        assert_eq!(Element::Wood.controls(), Element::Earth);
        assert_eq!(Element::Metal.controls(), Element::Wood);
    }

    #[test]
    fn test_stem_tags() {
        assert_eq!(Stem::Gap.element(), Element::Wood);
        assert_eq!(Stem::Gap.yin_yang(), YinYang::Yang);
        assert_eq!(Stem::Gye.element(), Element::Water);
        assert_eq!(Stem::Gye.yin_yang(), YinYang::Yin);
        assert_eq!(Stem::from_index(10), Stem::Gap);
    }

    #[test]
    fn test_branch_tags() {
        assert_eq!(Branch::Ja.element(), Element::Water);
        assert_eq!(Branch::O.element(), Element::Fire);
        assert_eq!(Branch::Jin.element(), Element::Earth);
        assert_eq!(Branch::from_index(12), Branch::Ja);
    }

    #[test]
    fn test_ganzhi_cycle_epoch() {
        let first = GanzhiCycle::from_index(0);
        assert_eq!(first.stem, Stem::Gap);
        assert_eq!(first.branch, Branch::Ja);
        assert_eq!(first.name(), "甲子");

        let last = GanzhiCycle::from_index(59);
        assert_eq!(last.stem, Stem::Gye);
        assert_eq!(last.branch, Branch::Hae);

        // Negative indices wrap.
        assert_eq!(GanzhiCycle::from_index(-1).index, 59);
    }

    #[test]
    fn test_five_element_counts() {
        let mut counts = FiveElementCounts::default();
        counts.add(Element::Wood);
        counts.add(Element::Wood);
        counts.add(Element::Fire);
        assert_eq!(counts.total(), 3);
        assert_eq!(counts.dominant(), Element::Wood);
    }
}
