//! Query catalog and resource descriptors
//!
//! One place defines, per entity, the canonical display query (primary table
//! plus the joins that turn foreign keys into human-readable `_name`
//! columns), the dependent-collection queries, the lookup option queries,
//! and the column maps used to apply writes. Resource handlers are generic
//! over these descriptors; adding a resource means adding a descriptor here,
//! not another handler.
//!
//! Join rule: a display query LEFT JOINs when the foreign key is optional
//! (person → gender, organization → parent) and INNER JOINs when it is
//! required (person → membership fee category), so an optional relation
//! never drops the primary row.

/// Physical table plus its writable columns.
///
/// `columns` maps payload keys to column names. Display queries alias some
/// columns (`person_name` for `person.name`), so a payload produced by
/// read-modify-write carries the alias; both spellings are accepted, the
/// first match per column wins. Keys absent from the map — including the
/// immutable `id`/`created_on`/`created_by` and join decorations such as
/// `gender_name` — are ignored on writes.
pub struct TableSpec {
    pub table: &'static str,
    pub columns: &'static [(&'static str, &'static str)],
    /// Contact tables must reference exactly one of person/organization
    pub xor_owner: bool,
}

/// One dependent collection of an aggregate (addresses of a person, ...).
pub struct CollectionSpec {
    /// Key in the aggregate JSON shape
    pub key: &'static str,
    /// Projection filtered by the owning foreign key (`?` = owner id)
    pub list_sql: &'static str,
    pub table: &'static TableSpec,
}

/// One lookup-table options list attached to an aggregate for display.
pub struct LookupSpec {
    pub key: &'static str,
    pub options_sql: &'static str,
}

/// A parent entity assembled from itself plus dependent collections and
/// lookup options.
pub struct AggregateSpec {
    /// Key of the primary object in the aggregate shape
    pub entity_key: &'static str,
    /// Column that ties a dependent-collection row to this entity
    pub owner_column: &'static str,
    /// Display query filtered by primary key (`?` = id)
    pub display_sql: &'static str,
    /// Display query page (`?` = limit, `?` = offset)
    pub list_sql: &'static str,
    pub count_sql: &'static str,
    pub table: &'static TableSpec,
    pub collections: &'static [CollectionSpec],
    pub lookups: &'static [LookupSpec],
}

/// A small reference table whose rows are offered as selectable options.
pub struct LookupTable {
    pub table: &'static TableSpec,
    /// `{value, label}` projection of rows with valid_flag = 'Y'
    pub options_sql: &'static str,
    /// Full-row projection for the maintenance endpoints
    pub map_sql: &'static str,
}

// ==================== Writable column maps ====================

pub static PERSON_TABLE: TableSpec = TableSpec {
    table: "person",
    columns: &[
        ("registration_number", "registration_number"),
        ("membership_id", "membership_id"),
        ("name", "name"),
        ("person_name", "name"),
        ("birthdate", "birthdate"),
        ("mother_name", "mother_name"),
        ("gender_id", "gender_id"),
        ("identity_card_number", "identity_card_number"),
        ("membership_fee_category_id", "membership_fee_category_id"),
        ("notes", "notes"),
    ],
    xor_owner: false,
};

pub static ORGANIZATION_TABLE: TableSpec = TableSpec {
    table: "organization",
    columns: &[
        ("name", "name"),
        ("organization_name", "name"),
        ("description", "description"),
        ("accepts_members_flag", "accepts_members_flag"),
        ("establishment_date", "establishment_date"),
        ("termination_date", "termination_date"),
        ("organization_parent_id", "organization_parent_id"),
        ("parent_organization_id", "organization_parent_id"),
        ("notes", "notes"),
    ],
    xor_owner: false,
};

pub static ADDRESS_TABLE: TableSpec = TableSpec {
    table: "address",
    columns: &[
        ("person_id", "person_id"),
        ("organization_id", "organization_id"),
        ("address_type_id", "address_type_id"),
        ("zip", "zip"),
        ("city", "city"),
        ("address_1", "address_1"),
        ("address_2", "address_2"),
    ],
    xor_owner: true,
};

pub static EMAIL_TABLE: TableSpec = TableSpec {
    table: "email",
    columns: &[
        ("person_id", "person_id"),
        ("organization_id", "organization_id"),
        ("email_type_id", "email_type_id"),
        ("email", "email"),
        ("messenger", "messenger"),
        ("skype", "skype"),
    ],
    xor_owner: true,
};

pub static PHONE_TABLE: TableSpec = TableSpec {
    table: "phone",
    columns: &[
        ("person_id", "person_id"),
        ("organization_id", "organization_id"),
        ("phone_type_id", "phone_type_id"),
        ("phone_number", "phone_number"),
        ("phone_extension", "phone_extension"),
        ("messenger", "messenger"),
        ("skype", "skype"),
        ("viber", "viber"),
        ("whatsapp", "whatsapp"),
    ],
    xor_owner: true,
};

pub static MEMBERSHIP_TABLE: TableSpec = TableSpec {
    table: "membership",
    columns: &[
        ("person_id", "person_id"),
        ("organization_id", "organization_id"),
        ("active_flag", "active_flag"),
        ("inactivity_status_id", "inactivity_status_id"),
        ("event_date", "event_date"),
        ("notes", "notes"),
    ],
    xor_owner: false,
};

static LOOKUP_COLUMNS: &[(&str, &str)] = &[
    ("name", "name"),
    ("description", "description"),
    ("valid_flag", "valid_flag"),
];

pub static GENDER_TABLE: TableSpec = TableSpec {
    table: "gender",
    columns: LOOKUP_COLUMNS,
    xor_owner: false,
};

pub static MEMBERSHIP_FEE_CATEGORY_TABLE: TableSpec = TableSpec {
    table: "membership_fee_category",
    columns: LOOKUP_COLUMNS,
    xor_owner: false,
};

pub static ADDRESS_TYPE_TABLE: TableSpec = TableSpec {
    table: "address_type",
    columns: LOOKUP_COLUMNS,
    xor_owner: false,
};

pub static EMAIL_TYPE_TABLE: TableSpec = TableSpec {
    table: "email_type",
    columns: LOOKUP_COLUMNS,
    xor_owner: false,
};

pub static PHONE_TYPE_TABLE: TableSpec = TableSpec {
    table: "phone_type",
    columns: LOOKUP_COLUMNS,
    xor_owner: false,
};

// ==================== Display queries ====================

const PERSON_DISPLAY_SQL: &str = "SELECT p.id AS person_id, p.registration_number, p.membership_id,
        p.name AS person_name, p.birthdate, p.mother_name,
        p.gender_id, g.name AS gender_name, p.identity_card_number,
        p.membership_fee_category_id, c.name AS membership_fee_category_name,
        p.notes
     FROM person p
     LEFT JOIN gender g ON g.id = p.gender_id
     JOIN membership_fee_category c ON c.id = p.membership_fee_category_id
     WHERE p.id = ?";

const PERSON_LIST_SQL: &str = "SELECT p.id AS person_id, p.registration_number, p.membership_id,
        p.name AS person_name, p.birthdate, p.mother_name,
        p.gender_id, g.name AS gender_name, p.identity_card_number,
        p.membership_fee_category_id, c.name AS membership_fee_category_name,
        p.notes
     FROM person p
     LEFT JOIN gender g ON g.id = p.gender_id
     JOIN membership_fee_category c ON c.id = p.membership_fee_category_id
     ORDER BY p.rowid
     LIMIT ? OFFSET ?";

const PERSON_COUNT_SQL: &str = "SELECT COUNT(id) FROM person";

const ORGANIZATION_DISPLAY_SQL: &str =
    "SELECT o.id AS organization_id, o.name AS organization_name,
        parent_org.id AS parent_organization_id,
        parent_org.name AS parent_organization_name,
        o.description, o.accepts_members_flag, o.establishment_date,
        o.termination_date, o.notes
     FROM organization o
     LEFT JOIN organization parent_org ON o.organization_parent_id = parent_org.id
     WHERE o.id = ?";

const ORGANIZATION_LIST_SQL: &str =
    "SELECT o.id AS organization_id, o.name AS organization_name,
        parent_org.id AS parent_organization_id,
        parent_org.name AS parent_organization_name,
        o.description, o.accepts_members_flag, o.establishment_date,
        o.termination_date, o.notes
     FROM organization o
     LEFT JOIN organization parent_org ON o.organization_parent_id = parent_org.id
     ORDER BY o.rowid
     LIMIT ? OFFSET ?";

const ORGANIZATION_COUNT_SQL: &str = "SELECT COUNT(id) FROM organization";

// ==================== Dependent-collection queries ====================

const PERSON_ADDRESS_SQL: &str =
    "SELECT id, person_id, address_type_id, zip, city, address_1, address_2
     FROM address WHERE person_id = ?";

const ORGANIZATION_ADDRESS_SQL: &str =
    "SELECT id, organization_id, address_type_id, zip, city, address_1, address_2
     FROM address WHERE organization_id = ?";

const PERSON_EMAIL_SQL: &str =
    "SELECT id, person_id, email_type_id, email, messenger, skype
     FROM email WHERE person_id = ?";

const ORGANIZATION_EMAIL_SQL: &str =
    "SELECT id, organization_id, email_type_id, email, messenger, skype
     FROM email WHERE organization_id = ?";

const PERSON_PHONE_SQL: &str =
    "SELECT id, person_id, phone_type_id, phone_number, phone_extension,
        messenger, skype, viber, whatsapp
     FROM phone WHERE person_id = ?";

const ORGANIZATION_PHONE_SQL: &str =
    "SELECT id, organization_id, phone_type_id, phone_number, phone_extension,
        messenger, skype, viber, whatsapp
     FROM phone WHERE organization_id = ?";

const PERSON_MEMBERSHIP_SQL: &str =
    "SELECT m.id, m.person_id, m.organization_id, o.name AS organization_name,
        m.active_flag, m.inactivity_status_id, m.event_date, m.notes
     FROM membership m
     JOIN organization o ON o.id = m.organization_id
     WHERE m.person_id = ?";

const ORGANIZATION_MEMBERSHIP_SQL: &str =
    "SELECT m.id, m.person_id, p.name AS person_name, m.organization_id,
        m.active_flag, m.inactivity_status_id, m.event_date, m.notes
     FROM membership m
     JOIN person p ON p.id = m.person_id
     WHERE m.organization_id = ?";

// ==================== Lookup option / map queries ====================
// Options are the rows still offered for selection; ordering is pinned to
// name ascending.

pub const GENDER_OPTIONS_SQL: &str =
    "SELECT id AS value, name AS label FROM gender WHERE valid_flag = 'Y' ORDER BY name";

pub const MEMBERSHIP_FEE_CATEGORY_OPTIONS_SQL: &str =
    "SELECT id AS value, name AS label FROM membership_fee_category
     WHERE valid_flag = 'Y' ORDER BY name";

pub const ADDRESS_TYPE_OPTIONS_SQL: &str =
    "SELECT id AS value, name AS label FROM address_type WHERE valid_flag = 'Y' ORDER BY name";

pub const EMAIL_TYPE_OPTIONS_SQL: &str =
    "SELECT id AS value, name AS label FROM email_type WHERE valid_flag = 'Y' ORDER BY name";

pub const PHONE_TYPE_OPTIONS_SQL: &str =
    "SELECT id AS value, name AS label FROM phone_type WHERE valid_flag = 'Y' ORDER BY name";

/// Root organizations still open for membership assignment: no parent, not
/// terminated. Feeds the organization creation form.
pub const PARENT_ORGANIZATION_OPTIONS_SQL: &str =
    "SELECT id AS value, name AS label FROM organization
     WHERE organization_parent_id IS NULL AND termination_date IS NULL
     ORDER BY name";

const GENDER_MAP_SQL: &str =
    "SELECT id, name, description, valid_flag, created_on, created_by FROM gender ORDER BY name";

const MEMBERSHIP_FEE_CATEGORY_MAP_SQL: &str =
    "SELECT id, name, description, valid_flag, created_on, created_by
     FROM membership_fee_category ORDER BY name";

const ADDRESS_TYPE_MAP_SQL: &str =
    "SELECT id, name, description, valid_flag, created_on, created_by
     FROM address_type ORDER BY name";

const EMAIL_TYPE_MAP_SQL: &str =
    "SELECT id, name, description, valid_flag, created_on, created_by
     FROM email_type ORDER BY name";

const PHONE_TYPE_MAP_SQL: &str =
    "SELECT id, name, description, valid_flag, created_on, created_by
     FROM phone_type ORDER BY name";

// ==================== Aggregate descriptors ====================

pub static PERSON: AggregateSpec = AggregateSpec {
    entity_key: "person",
    owner_column: "person_id",
    display_sql: PERSON_DISPLAY_SQL,
    list_sql: PERSON_LIST_SQL,
    count_sql: PERSON_COUNT_SQL,
    table: &PERSON_TABLE,
    collections: &[
        CollectionSpec {
            key: "address",
            list_sql: PERSON_ADDRESS_SQL,
            table: &ADDRESS_TABLE,
        },
        CollectionSpec {
            key: "email",
            list_sql: PERSON_EMAIL_SQL,
            table: &EMAIL_TABLE,
        },
        CollectionSpec {
            key: "phone",
            list_sql: PERSON_PHONE_SQL,
            table: &PHONE_TABLE,
        },
        CollectionSpec {
            key: "membership",
            list_sql: PERSON_MEMBERSHIP_SQL,
            table: &MEMBERSHIP_TABLE,
        },
    ],
    lookups: &[
        LookupSpec {
            key: "gender_type",
            options_sql: GENDER_OPTIONS_SQL,
        },
        LookupSpec {
            key: "membership_fee_type",
            options_sql: MEMBERSHIP_FEE_CATEGORY_OPTIONS_SQL,
        },
        LookupSpec {
            key: "address_type",
            options_sql: ADDRESS_TYPE_OPTIONS_SQL,
        },
        LookupSpec {
            key: "email_type",
            options_sql: EMAIL_TYPE_OPTIONS_SQL,
        },
        LookupSpec {
            key: "phone_type",
            options_sql: PHONE_TYPE_OPTIONS_SQL,
        },
    ],
};

pub static ORGANIZATION: AggregateSpec = AggregateSpec {
    entity_key: "organization",
    owner_column: "organization_id",
    display_sql: ORGANIZATION_DISPLAY_SQL,
    list_sql: ORGANIZATION_LIST_SQL,
    count_sql: ORGANIZATION_COUNT_SQL,
    table: &ORGANIZATION_TABLE,
    collections: &[
        CollectionSpec {
            key: "address",
            list_sql: ORGANIZATION_ADDRESS_SQL,
            table: &ADDRESS_TABLE,
        },
        CollectionSpec {
            key: "email",
            list_sql: ORGANIZATION_EMAIL_SQL,
            table: &EMAIL_TABLE,
        },
        CollectionSpec {
            key: "phone",
            list_sql: ORGANIZATION_PHONE_SQL,
            table: &PHONE_TABLE,
        },
        CollectionSpec {
            key: "membership",
            list_sql: ORGANIZATION_MEMBERSHIP_SQL,
            table: &MEMBERSHIP_TABLE,
        },
    ],
    lookups: &[
        LookupSpec {
            key: "address_type",
            options_sql: ADDRESS_TYPE_OPTIONS_SQL,
        },
        LookupSpec {
            key: "email_type",
            options_sql: EMAIL_TYPE_OPTIONS_SQL,
        },
        LookupSpec {
            key: "phone_type",
            options_sql: PHONE_TYPE_OPTIONS_SQL,
        },
    ],
};

// ==================== Lookup descriptors ====================

pub static GENDER: LookupTable = LookupTable {
    table: &GENDER_TABLE,
    options_sql: GENDER_OPTIONS_SQL,
    map_sql: GENDER_MAP_SQL,
};

pub static MEMBERSHIP_FEE_CATEGORY: LookupTable = LookupTable {
    table: &MEMBERSHIP_FEE_CATEGORY_TABLE,
    options_sql: MEMBERSHIP_FEE_CATEGORY_OPTIONS_SQL,
    map_sql: MEMBERSHIP_FEE_CATEGORY_MAP_SQL,
};

pub static ADDRESS_TYPE: LookupTable = LookupTable {
    table: &ADDRESS_TYPE_TABLE,
    options_sql: ADDRESS_TYPE_OPTIONS_SQL,
    map_sql: ADDRESS_TYPE_MAP_SQL,
};

pub static EMAIL_TYPE: LookupTable = LookupTable {
    table: &EMAIL_TYPE_TABLE,
    options_sql: EMAIL_TYPE_OPTIONS_SQL,
    map_sql: EMAIL_TYPE_MAP_SQL,
};

pub static PHONE_TYPE: LookupTable = LookupTable {
    table: &PHONE_TYPE_TABLE,
    options_sql: PHONE_TYPE_OPTIONS_SQL,
    map_sql: PHONE_TYPE_MAP_SQL,
};
