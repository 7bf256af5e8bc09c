use crate::Quantity;

use super::conversion::Conversion;

use Conversion::{HchoV1, HumidityV1, HumidityV2, Pm2p5V1, Pm2p5V2, Simple, TemperatureV1};
use Quantity::{
    Co2, Formaldehyde, Humidity, NitrousOxide, Pm1, Pm4, Pm10, Pm25, Temperature,
    VolatileOrganicCompounds as Voc,
};

/// One 16-bit little-endian field inside a sample payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub quantity: Quantity,
    pub offset: usize,
    pub conversion: Conversion,
    /// Only decoded when extended fields are requested.
    pub extended: bool,
}

impl FieldSpec {
    const fn new(quantity: Quantity, offset: usize, conversion: Conversion) -> Self {
        Self {
            quantity,
            offset,
            conversion,
            extended: false,
        }
    }

    const fn extended(quantity: Quantity, offset: usize, conversion: Conversion) -> Self {
        Self {
            quantity,
            offset,
            conversion,
            extended: true,
        }
    }
}

/// Named, ordered field layout of a sample payload.
#[derive(Debug, PartialEq, Eq)]
pub struct SampleLayout {
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
}

impl SampleLayout {
    /// Fields decoded under the given extended-field setting, in wire order.
    pub fn active_fields(&self, extended: bool) -> impl Iterator<Item = &'static FieldSpec> {
        self.fields
            .iter()
            .filter(move |field| extended || !field.extended)
    }

    /// Payload length needed to decode every active field.
    pub fn required_len(&self, extended: bool) -> usize {
        self.active_fields(extended)
            .map(|field| field.offset + FIELD_LEN)
            .max()
            .unwrap_or(0)
    }
}

pub const FIELD_LEN: usize = 2;

const T: FieldSpec = FieldSpec::new(Temperature, 0, TemperatureV1);
const RH: FieldSpec = FieldSpec::new(Humidity, 2, HumidityV1);

pub const T_RH_VOC: SampleLayout = SampleLayout {
    name: "t_rh_voc",
    fields: &[T, RH, FieldSpec::new(Voc, 4, Simple)],
};

pub const T_RH_V1: SampleLayout = SampleLayout {
    name: "t_rh_v1",
    fields: &[T, RH],
};

pub const T_RH_V2: SampleLayout = SampleLayout {
    name: "t_rh_v2",
    fields: &[T, FieldSpec::new(Humidity, 2, HumidityV2)],
};

pub const T_RH_CO2: SampleLayout = SampleLayout {
    name: "t_rh_co2",
    fields: &[T, RH, FieldSpec::new(Co2, 4, Simple)],
};

pub const T_RH_CO2_ALT: SampleLayout = SampleLayout {
    name: "t_rh_co2_alt",
    fields: &[T, RH, FieldSpec::new(Co2, 4, Simple)],
};

pub const T_RH_CO2_PM25_V1: SampleLayout = SampleLayout {
    name: "t_rh_co2_pm25_v1",
    fields: &[
        T,
        RH,
        FieldSpec::new(Co2, 4, Simple),
        FieldSpec::new(Pm25, 6, Pm2p5V1),
    ],
};

pub const T_RH_HCHO: SampleLayout = SampleLayout {
    name: "t_rh_hcho",
    fields: &[T, RH, FieldSpec::extended(Formaldehyde, 4, HchoV1)],
};

pub const T_RH_VOC_PM25_V1: SampleLayout = SampleLayout {
    name: "t_rh_voc_pm25_v1",
    fields: &[
        T,
        RH,
        FieldSpec::new(Voc, 4, Simple),
        FieldSpec::new(Pm25, 6, Pm2p5V1),
    ],
};

pub const T_RH_CO2_VOC_PM25_HCHO_V1: SampleLayout = SampleLayout {
    name: "t_rh_co2_voc_pm25_hcho_v1",
    fields: &[
        T,
        RH,
        FieldSpec::new(Co2, 4, Simple),
        FieldSpec::new(Voc, 6, Simple),
        FieldSpec::new(Pm25, 8, Pm2p5V1),
        FieldSpec::extended(Formaldehyde, 10, HchoV1),
    ],
};

pub const T_RH_VOC_NOX: SampleLayout = SampleLayout {
    name: "t_rh_voc_nox",
    fields: &[
        T,
        RH,
        FieldSpec::new(Voc, 4, Simple),
        FieldSpec::new(NitrousOxide, 6, Simple),
    ],
};

// Offset 6 is not decoded.
pub const T_RH_VOC_PM25_V2_GAP: SampleLayout = SampleLayout {
    name: "t_rh_voc_pm25_v2_gap",
    fields: &[
        T,
        RH,
        FieldSpec::new(Voc, 4, Simple),
        FieldSpec::new(Pm25, 8, Pm2p5V2),
    ],
};

// Offset 8 is not decoded.
pub const T_RH_CO2_VOC_PM25_V2_GAP: SampleLayout = SampleLayout {
    name: "t_rh_co2_voc_pm25_v2_gap",
    fields: &[
        T,
        RH,
        FieldSpec::new(Co2, 4, Simple),
        FieldSpec::new(Voc, 6, Simple),
        FieldSpec::new(Pm25, 10, Pm2p5V2),
    ],
};

pub const T_RH_CO2_PM25_V2: SampleLayout = SampleLayout {
    name: "t_rh_co2_pm25_v2",
    fields: &[
        T,
        RH,
        FieldSpec::new(Co2, 4, Simple),
        FieldSpec::new(Pm25, 6, Pm2p5V2),
    ],
};

pub const T_RH_VOC_PM25_V2: SampleLayout = SampleLayout {
    name: "t_rh_voc_pm25_v2",
    fields: &[
        T,
        RH,
        FieldSpec::new(Voc, 4, Simple),
        FieldSpec::new(Pm25, 6, Pm2p5V2),
    ],
};

pub const T_RH_CO2_VOC_PM25_HCHO_V2: SampleLayout = SampleLayout {
    name: "t_rh_co2_voc_pm25_hcho_v2",
    fields: &[
        T,
        RH,
        FieldSpec::new(Co2, 4, Simple),
        FieldSpec::new(Voc, 6, Simple),
        FieldSpec::new(Pm25, 8, Pm2p5V2),
        FieldSpec::extended(Formaldehyde, 10, HchoV1),
    ],
};

pub const CO2: SampleLayout = SampleLayout {
    name: "co2",
    fields: &[FieldSpec::new(Co2, 0, Simple)],
};

/// Particulate-only layout. Tag 32 is claimed by
/// `T_RH_CO2_VOC_PM25_HCHO_V2`, so this one is only reachable by name.
pub const PM1_PM2P5_PM4_PM10: SampleLayout = SampleLayout {
    name: "pm1_pm2p5_pm4_pm10",
    fields: &[
        FieldSpec::new(Pm1, 0, Simple),
        FieldSpec::new(Pm25, 2, Simple),
        FieldSpec::extended(Pm4, 4, Simple),
        FieldSpec::new(Pm10, 6, Simple),
    ],
};

/// Sample type tag to layout, in ascending tag order.
pub const SAMPLE_TYPES: &[(u8, &SampleLayout)] = &[
    (3, &T_RH_VOC),
    (4, &T_RH_V1),
    (6, &T_RH_V2),
    (8, &T_RH_CO2),
    (10, &T_RH_CO2_ALT),
    (12, &T_RH_CO2_PM25_V1),
    (14, &T_RH_HCHO),
    (16, &T_RH_VOC_PM25_V1),
    (20, &T_RH_CO2_VOC_PM25_HCHO_V1),
    (22, &T_RH_VOC_NOX),
    (24, &T_RH_VOC_PM25_V2_GAP),
    (26, &T_RH_CO2_VOC_PM25_V2_GAP),
    (28, &T_RH_CO2_PM25_V2),
    (30, &T_RH_VOC_PM25_V2),
    (32, &T_RH_CO2_VOC_PM25_HCHO_V2),
    (34, &CO2),
];

/// Layouts that no sample type maps to.
pub const UNBOUND_LAYOUTS: &[&SampleLayout] = &[&PM1_PM2P5_PM4_PM10];

pub fn lookup(sample_type: u8) -> Option<&'static SampleLayout> {
    SAMPLE_TYPES
        .iter()
        .find(|(tag, _)| *tag == sample_type)
        .map(|(_, layout)| *layout)
}

pub fn layout_by_name(name: &str) -> Option<&'static SampleLayout> {
    SAMPLE_TYPES
        .iter()
        .map(|(_, layout)| *layout)
        .chain(UNBOUND_LAYOUTS.iter().copied())
        .find(|layout| layout.name == name)
}
