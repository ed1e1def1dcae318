//! FILENAME: core/engine/src/fields.rs
//! PURPOSE: Static column metadata for the two staff categories.
//! CONTEXT: Field descriptors drive column generation, export headers, and
//! sort comparator selection. They are data about the schema, not data
//! itself: one fixed set per category, defined once, never mutated.

use serde::{Deserialize, Serialize};

// ============================================================================
// FIELD KIND
// ============================================================================

/// The value kind of a column. Decides the sort comparator and how the cell
/// is rendered by the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKind {
    Text,
    Date,
    Number,
    Boolean,
    Select,
    Textarea,
}

// ============================================================================
// FIELD DESCRIPTOR
// ============================================================================

/// Static metadata for a single column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    /// Logical key in camelCase; reads resolve through the dual-key accessor.
    pub key: &'static str,
    /// Display label (header text).
    pub label: &'static str,
    pub kind: FieldKind,
    /// Grouping section for the column chooser.
    pub section: &'static str,
    /// Relative display-width hint.
    pub width: u16,
    /// Fixed option list for `Select` columns, empty otherwise.
    pub options: &'static [&'static str],
}

const fn field(
    key: &'static str,
    label: &'static str,
    kind: FieldKind,
    section: &'static str,
    width: u16,
) -> FieldDescriptor {
    FieldDescriptor { key, label, kind, section, width, options: &[] }
}

const fn select(
    key: &'static str,
    label: &'static str,
    section: &'static str,
    width: u16,
    options: &'static [&'static str],
) -> FieldDescriptor {
    FieldDescriptor { key, label, kind: FieldKind::Select, section, width, options }
}

// ============================================================================
// STAFF CATEGORY
// ============================================================================

/// The two personnel categories. Dispatch staff are placed at client sites;
/// contract staff work fixed contracted jobs. Each has its own column set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaffCategory {
    Dispatch,
    Contract,
}

impl StaffCategory {
    /// Stable lowercase tag, used as the `category` record field value and
    /// as the preference-key prefix.
    pub fn as_str(&self) -> &'static str {
        match self {
            StaffCategory::Dispatch => "dispatch",
            StaffCategory::Contract => "contract",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StaffCategory::Dispatch => "派遣",
            StaffCategory::Contract => "請負",
        }
    }

    /// The column set for this category.
    pub fn fields(&self) -> &'static [FieldDescriptor] {
        match self {
            StaffCategory::Dispatch => DISPATCH_FIELDS,
            StaffCategory::Contract => CONTRACT_FIELDS,
        }
    }

    /// Looks up a descriptor by logical key.
    pub fn descriptor(&self, key: &str) -> Option<&'static FieldDescriptor> {
        self.fields().iter().find(|f| f.key == key)
    }
}

// ============================================================================
// FIELD SETS
// ============================================================================

/// Columns for dispatch staff.
pub static DISPATCH_FIELDS: &[FieldDescriptor] = &[
    field("status", "現在", FieldKind::Text, "Status", 24),
    field("empId", "社員№", FieldKind::Text, "Identification", 24),
    field("dispatchId", "派遣先ID", FieldKind::Text, "Identification", 24),
    field("dispatchCompany", "派遣先", FieldKind::Text, "Identification", 48),
    field("department", "配属先", FieldKind::Text, "Assignment", 48),
    field("line", "配属ライン", FieldKind::Text, "Assignment", 32),
    field("jobContent", "仕事内容", FieldKind::Text, "Assignment", 48),
    field("fullName", "氏名", FieldKind::Text, "Profile", 48),
    field("furigana", "カナ", FieldKind::Text, "Profile", 48),
    select("gender", "性別", "Profile", 16, &["男", "女"]),
    field("nationality", "国籍", FieldKind::Text, "Profile", 32),
    field("birthDate", "生年月日", FieldKind::Date, "Profile", 32),
    field("age", "年齢", FieldKind::Number, "Profile", 16),
    field("hourlyWage", "時給", FieldKind::Number, "Financial", 24),
    field("wageRevision", "時給改定", FieldKind::Text, "Financial", 48),
    field("billingUnit", "請求単価", FieldKind::Number, "Financial", 24),
    field("billingRevision", "請求改定", FieldKind::Text, "Financial", 48),
    field("profitMargin", "差額利益", FieldKind::Number, "Financial", 24),
    field("standardRemuneration", "標準報酬", FieldKind::Number, "Insurance", 24),
    field("healthIns", "健康保険", FieldKind::Number, "Insurance", 24),
    field("nursingIns", "介護保険", FieldKind::Number, "Insurance", 24),
    field("pension", "厚生年金", FieldKind::Number, "Insurance", 24),
    field("visaExpiry", "ビザ期限", FieldKind::Date, "Visa", 32),
    field("visaAlert", "ｱﾗｰﾄ(ﾋﾞｻﾞ更新)", FieldKind::Text, "Visa", 32),
    field("visaType", "ビザ種類", FieldKind::Text, "Visa", 48),
    field("postalCode", "〒", FieldKind::Text, "Contact", 24),
    field("address", "住所", FieldKind::Text, "Contact", 64),
    field("apartment", "ｱﾊﾟｰﾄ", FieldKind::Text, "Contact", 32),
    field("isShaku", "社宅", FieldKind::Boolean, "Contact", 16),
    field("moveInDate", "入居", FieldKind::Date, "Dates", 32),
    field("hireDate", "入社日", FieldKind::Date, "Dates", 32),
    field("resignDate", "退社日", FieldKind::Date, "Dates", 32),
    field("moveOutDate", "退去", FieldKind::Date, "Dates", 32),
    field("socialInsStatus", "社保加入", FieldKind::Text, "Insurance", 24),
    field("hireRequest", "入社依頼", FieldKind::Text, "Other", 24),
    field("remarks", "備考", FieldKind::Textarea, "Other", 64),
    field("currentHireDate", "現入社", FieldKind::Date, "Dates", 32),
    field("licenseType", "免許種類", FieldKind::Text, "Other", 32),
    field("licenseExpiry", "免許期限", FieldKind::Date, "Other", 32),
    field("commuteMethod", "通勤方法", FieldKind::Text, "Other", 32),
    field("voluntaryInsExpiry", "任意保険期限", FieldKind::Date, "Other", 32),
    field("japaneseLevel", "日本語検定", FieldKind::Text, "Skills", 32),
    field("careerUp5", "キャリアアップ5年目", FieldKind::Text, "Other", 32),
];

/// Columns for contract staff.
pub static CONTRACT_FIELDS: &[FieldDescriptor] = &[
    field("status", "現在", FieldKind::Text, "Status", 24),
    field("empId", "社員№", FieldKind::Text, "Identification", 24),
    field("contractWork", "請負業務", FieldKind::Text, "Assignment", 48),
    field("fullName", "氏名", FieldKind::Text, "Profile", 48),
    field("furigana", "カナ", FieldKind::Text, "Profile", 48),
    select("gender", "性別", "Profile", 16, &["男", "女"]),
    field("nationality", "国籍", FieldKind::Text, "Profile", 32),
    field("birthDate", "生年月日", FieldKind::Date, "Profile", 32),
    field("age", "年齢", FieldKind::Number, "Profile", 16),
    field("hourlyWage", "時給", FieldKind::Number, "Financial", 24),
    field("wageRevision", "時給改定", FieldKind::Text, "Financial", 48),
    field("standardRemuneration", "標準報酬", FieldKind::Number, "Insurance", 24),
    field("healthIns", "健康保険", FieldKind::Number, "Insurance", 24),
    field("nursingIns", "介護保険", FieldKind::Number, "Insurance", 24),
    field("pension", "厚生年金", FieldKind::Number, "Insurance", 24),
    field("commuteDist", "通勤距離", FieldKind::Number, "Commute", 24),
    field("transportationCost", "交通費", FieldKind::Number, "Commute", 24),
    field("profitMargin", "差額利益", FieldKind::Number, "Financial", 24),
    field("visaExpiry", "ビザ期限", FieldKind::Date, "Visa", 32),
    field("visaAlert", "ｱﾗｰﾄ(ﾋﾞｻﾞ更新)", FieldKind::Text, "Visa", 32),
    field("visaType", "ビザ種類", FieldKind::Text, "Visa", 48),
    field("postalCode", "〒", FieldKind::Text, "Contact", 24),
    field("address", "住所", FieldKind::Text, "Contact", 64),
    field("apartment", "ｱﾊﾟｰﾄ", FieldKind::Text, "Contact", 32),
    field("isShaku", "社宅", FieldKind::Boolean, "Contact", 16),
    field("moveInDate", "入居", FieldKind::Date, "Dates", 32),
    field("hireDate", "入社日", FieldKind::Date, "Dates", 32),
    field("resignDate", "退社日", FieldKind::Date, "Dates", 32),
    field("moveOutDate", "退去", FieldKind::Date, "Dates", 32),
    field("socialInsStatus", "社保加入", FieldKind::Text, "Insurance", 24),
    field("bankAccountHolder", "口座名義", FieldKind::Text, "Banking", 32),
    field("bankName", "銀行名", FieldKind::Text, "Banking", 32),
    field("branchNum", "支店番号", FieldKind::Text, "Banking", 24),
    field("branchName", "支店名", FieldKind::Text, "Banking", 32),
    field("accountNum", "口座番号", FieldKind::Text, "Banking", 32),
    field("hireRequest", "入社依頼", FieldKind::Text, "Other", 24),
    field("remarks", "備考", FieldKind::Textarea, "Other", 64),
];
