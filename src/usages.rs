// SPDX-License-Identifier: MIT

//! Human-readable names for Usage Pages, Usages, Collection types, Units
//! and data item attributes.
//!
//! The pages used by joysticks, gamepads and their kin have built-in
//! tables (see the [HID Usage Tables](https://usb.org/document-library/hid-usage-tables-15)).
//! With the `hut` feature enabled the [hut] crate is consulted for any
//! other page.

use crate::tree::MainItemType;
use crate::types::UsagePage;
use tracing::warn;

type UsageTable = &'static [(u32, &'static str)];

fn lookup(table: UsageTable, id: u32) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == id).map(|(_, name)| *name)
}

const USAGE_PAGES: UsageTable = &[
    (0x00, "Undefined"),
    (0x01, "Generic Desktop Controls"),
    (0x02, "Simulation Controls"),
    (0x03, "VR Controls"),
    (0x04, "Sport Controls"),
    (0x05, "Game Controls"),
    (0x06, "Generic Device Controls"),
    (0x07, "Keyboard/Keypad"),
    (0x08, "LEDs"),
    (0x09, "Button"),
    (0x0a, "Ordinal"),
    (0x0b, "Telephony"),
    (0x0c, "Consumer"),
    (0x0d, "Digitizer"),
    (0x0e, "Haptics"),
    (0x0f, "PID Page"),
    (0x10, "Unicode"),
    (0x11, "SoC"),
    (0x12, "Eye and Head Trackers"),
    (0x14, "Alphanumeric Display"),
    (0x20, "Sensors"),
    (0x40, "Medical Instruments"),
    (0x41, "Braille Display"),
    (0x59, "Lighting And Illumination"),
    (0x80, "Monitor pages"),
    (0x81, "Monitor pages"),
    (0x82, "Monitor pages"),
    (0x83, "Monitor pages"),
    (0x84, "Power pages"),
    (0x85, "Power pages"),
    (0x86, "Power pages"),
    (0x87, "Power pages"),
    (0x8c, "Bar Code Scanner page"),
    (0x8d, "Scale page"),
    (0x8e, "Magnetic Stripe Reading (MSR) Devices"),
    (0x8f, "Reserved Point of Sale pages"),
    (0x90, "Camera Control Page"),
    (0x91, "Arcade Page"),
    (0x92, "Gaming Device"),
    (0xf1d0, "FIDO Alliance"),
];

const GENERIC_DESKTOP: UsageTable = &[
    (0x00, "Undefined"),
    (0x01, "Pointer"),
    (0x02, "Mouse"),
    (0x04, "Joystick"),
    (0x05, "Gamepad"),
    (0x06, "Keyboard"),
    (0x07, "Keypad"),
    (0x08, "Multi-axis Controller"),
    (0x30, "X"),
    (0x31, "Y"),
    (0x32, "Z"),
    (0x33, "Rx"),
    (0x34, "Ry"),
    (0x35, "Rz"),
    (0x36, "Slider"),
    (0x37, "Dial"),
    (0x38, "Wheel"),
    (0x39, "Hat switch"),
    (0x3a, "Counted Buffer"),
    (0x3b, "Byte Count"),
    (0x3c, "Motion Wakeup"),
    (0x3d, "Start"),
    (0x3e, "Select"),
    (0x40, "Vx"),
    (0x41, "Vy"),
    (0x42, "Vz"),
    (0x43, "Vbrx"),
    (0x44, "Vbry"),
    (0x45, "Vbrz"),
    (0x46, "Vno"),
    (0x47, "Feature Notification"),
    (0x80, "System Control"),
    (0x81, "System Power Down"),
    (0x82, "System Sleep"),
    (0x83, "System Wake Up"),
    (0x84, "System Context Menu"),
    (0x85, "System Main Menu"),
    (0x86, "System App Menu"),
    (0x87, "System Menu Help"),
    (0x88, "System Menu Exit"),
    (0x89, "System Menu Select"),
    (0x8a, "System Menu Right"),
    (0x8b, "System Menu Left"),
    (0x8c, "System Menu Up"),
    (0x8d, "System Menu Down"),
    (0x8e, "System Cold Restart"),
    (0x8f, "System Warm Restart"),
    (0x90, "D-pad Up"),
    (0x91, "D-pad Down"),
    (0x92, "D-pad Right"),
    (0x93, "D-pad Left"),
    (0xa0, "System Dock"),
    (0xa1, "System Undock"),
    (0xa2, "System Setup"),
    (0xa3, "System Break"),
    (0xa4, "System Debugger Break"),
    (0xa5, "Application Break"),
    (0xa6, "Application Debugger Break"),
    (0xa7, "System Speaker Mute"),
    (0xa8, "System Hibernate"),
    (0xb0, "System Display Invert"),
    (0xb1, "System Display Internal"),
    (0xb2, "System Display External"),
    (0xb3, "System Display Both"),
    (0xb4, "System Display Dual"),
    (0xb5, "System Display Toggle Int/Ext"),
    (0xb6, "System Display Swap Primary/Secondary"),
    (0xb7, "System Display LCD Autoscale"),
];

const SIMULATION_CONTROLS: UsageTable = &[
    (0x00, "Undefined"),
    (0x01, "Flight Simulation Device"),
    (0x02, "Automobile Simulation Device"),
    (0x03, "Tank Simulation Device"),
    (0x04, "Spaceship Simulation Device"),
    (0x05, "Submarine Simulation Device"),
    (0x06, "Sailing Simulation Device"),
    (0x07, "Motorcycle Simulation Device"),
    (0x08, "Sports Simulation Device"),
    (0x09, "Airplane Simulation Device"),
    (0x0a, "Helicopter Simulation Device"),
    (0x0b, "Magic Carpet Simulation Device"),
    (0x0c, "Bicycle Simulation Device"),
    (0x20, "Flight Control Stick"),
    (0x21, "Flight Stick"),
    (0x22, "Cyclic Control"),
    (0x23, "Cyclic Trim"),
    (0x24, "Flight Yoke"),
    (0x25, "Track Control"),
    (0xb0, "Aileron"),
    (0xb1, "Aileron Trim"),
    (0xb2, "Anti-Torque Control"),
    (0xb3, "Autopilot Enable"),
    (0xb4, "Chaff Release"),
    (0xb5, "Collective Control"),
    (0xb6, "Dive Brake"),
    (0xb7, "Electronic Countermeasures"),
    (0xb8, "Elevator"),
    (0xb9, "Elevator Trim"),
    (0xba, "Rudder"),
    (0xbb, "Throttle"),
    (0xbc, "Flight Communications"),
    (0xbd, "Flare Release"),
    (0xbe, "Landing Gear"),
    (0xbf, "Toe Brake"),
    (0xc0, "Trigger"),
    (0xc1, "Weapons Arm"),
    (0xc2, "Weapons Select"),
    (0xc3, "Wing Flaps"),
    (0xc4, "Accelerator"),
    (0xc5, "Brake"),
    (0xc6, "Clutch"),
    (0xc7, "Shifter"),
    (0xc8, "Steering"),
    (0xc9, "Turret Direction"),
    (0xca, "Barrel Elevation"),
    (0xcb, "Dive Plane"),
    (0xcc, "Ballast"),
    (0xcd, "Bicycle Crank"),
    (0xce, "Handle Bars"),
    (0xcf, "Front Brake"),
    (0xd0, "Rear Brake"),
];

const VR_CONTROLS: UsageTable = &[
    (0x00, "Undefined"),
    (0x01, "Belt"),
    (0x02, "Body Suit"),
    (0x03, "Flexor"),
    (0x04, "Glove"),
    (0x05, "Head Tracker"),
    (0x06, "Head Mounted Display"),
    (0x07, "Hand Tracker"),
    (0x08, "Oculometer"),
    (0x09, "Vest"),
    (0x0a, "Animatronic Device"),
    (0x20, "Stereo Enable"),
    (0x21, "Display Enable"),
];

const SPORT_CONTROLS: UsageTable = &[
    (0x00, "Undefined"),
    (0x01, "Baseball Bat"),
    (0x02, "Golf Club"),
    (0x03, "Rowing Machine"),
    (0x04, "Treadmill"),
    (0x30, "Oar"),
    (0x31, "Slope"),
    (0x32, "Rate"),
    (0x33, "Stick Speed"),
    (0x34, "Stick Face Angle"),
    (0x35, "Stick Heel/Toe"),
    (0x36, "Stick Follow Through"),
    (0x37, "Stick Tempo"),
    (0x38, "Stick Type"),
    (0x39, "Stick Height"),
    (0x50, "Putter"),
    (0x51, "1 Iron"),
    (0x52, "2 Iron"),
    (0x53, "3 Iron"),
    (0x54, "4 Iron"),
    (0x55, "5 Iron"),
    (0x56, "6 Iron"),
    (0x57, "7 Iron"),
    (0x58, "8 Iron"),
    (0x59, "9 Iron"),
    (0x5a, "10 Iron"),
    (0x5b, "11 Iron"),
    (0x5c, "Sand Wedge"),
    (0x5d, "Loft Wedge"),
    (0x5e, "Power Wedge"),
    (0x5f, "1 Wood"),
    (0x60, "3 Wood"),
    (0x61, "5 Wood"),
    (0x62, "7 Wood"),
    (0x63, "9 Wood"),
];

const GAME_CONTROLS: UsageTable = &[
    (0x00, "Undefined"),
    (0x01, "3D Game Controller"),
    (0x02, "Pinball Device"),
    (0x03, "Gun Device"),
    (0x20, "Point of View"),
    (0x21, "Turn Right/Left"),
    (0x22, "Pitch Forward/Backward"),
    (0x23, "Roll Right/Left"),
    (0x24, "Move Right/Left"),
    (0x25, "Move Forward/Backward"),
    (0x26, "Move Up/Down"),
    (0x27, "Lean Right/Left"),
    (0x28, "Lean Forward/Backward"),
    (0x29, "Height of POV"),
    (0x2a, "Flipper"),
    (0x2b, "Secondary Flipper"),
    (0x2c, "Bump"),
    (0x2d, "New Game"),
    (0x2e, "Shoot Ball"),
    (0x2f, "Player"),
    (0x30, "Gun Bolt"),
    (0x31, "Gun Clip"),
    (0x32, "Gun Selector"),
    (0x33, "Gun Single Shot"),
    (0x34, "Gun Burst"),
    (0x35, "Gun Automatic"),
    (0x36, "Gun Safety"),
    (0x37, "Gamepad Fire/Jump"),
    (0x39, "Gamepad Trigger"),
];

const GENERIC_DEVICE_CONTROLS: UsageTable = &[
    (0x00, "Undefined"),
    (0x20, "Battery Strength"),
    (0x21, "Wireless Channel"),
    (0x22, "Wireless ID"),
];

const KEYBOARD_KEYPAD: UsageTable = &[
    (0x00, "Undefined"),
    (0x01, "Keyboard ErrorRollOver"),
    (0x02, "Keyboard POSTFail"),
    (0x03, "Keyboard ErrorUndefined"),
    (0x28, "Keyboard Return"),
    (0x29, "Keyboard Escape"),
    (0x2a, "Keyboard Delete (Backspace)"),
    (0x2b, "Keyboard Tab"),
    (0x2c, "Keyboard Spacebar"),
    (0x2d, "Keyboard - and _"),
    (0x2e, "Keyboard = and +"),
    (0x2f, "Keyboard [ and {"),
    (0x30, "Keyboard ] and }"),
    (0x31, "Keyboard \\ and |"),
    (0x32, "Keyboard Non-US # and ~"),
    (0x33, "Keyboard ; and :"),
    (0x34, "Keyboard ' and \""),
    (0x35, "Keyboard Grave Accent and Tilde"),
    (0x36, "Keyboard , and <"),
    (0x37, "Keyboard . and >"),
    (0x38, "Keyboard / and ?"),
    (0x39, "Keyboard Caps Lock"),
    (0xe0, "Keyboard LeftControl"),
    (0xe1, "Keyboard LeftShift"),
    (0xe2, "Keyboard LeftAlt"),
    (0xe3, "Keyboard Left GUI"),
    (0xe4, "Keyboard RightControl"),
    (0xe5, "Keyboard RightShift"),
    (0xe6, "Keyboard RightAlt"),
    (0xe7, "Keyboard Right GUI"),
];

/// Keyboard usages that follow a regular pattern: letters, digits and
/// function keys.
fn keyboard_key_name(id: u32) -> Option<String> {
    const DIGITS: &[u8] = b"1234567890";
    const SHIFTED: &[u8] = b"!@#$%^&*()";
    match id {
        0x04..=0x1d => {
            let c = (b'a' + (id - 0x04) as u8) as char;
            Some(format!("Keyboard {c} and {}", c.to_ascii_uppercase()))
        }
        0x1e..=0x27 => {
            let i = (id - 0x1e) as usize;
            Some(format!(
                "Keyboard {} and {}",
                DIGITS[i] as char, SHIFTED[i] as char
            ))
        }
        0x3a..=0x45 => Some(format!("Keyboard F{}", id - 0x3a + 1)),
        0x68..=0x73 => Some(format!("Keyboard F{}", id - 0x68 + 13)),
        _ => None,
    }
}

/// The table for a page, `None` if there is no built-in table.
fn page_table(usage_page: u32) -> Option<UsageTable> {
    match usage_page {
        0x01 => Some(GENERIC_DESKTOP),
        0x02 => Some(SIMULATION_CONTROLS),
        0x03 => Some(VR_CONTROLS),
        0x04 => Some(SPORT_CONTROLS),
        0x05 => Some(GAME_CONTROLS),
        0x06 => Some(GENERIC_DEVICE_CONTROLS),
        0x07 => Some(KEYBOARD_KEYPAD),
        _ => None,
    }
}

/// True if `usage_page` is vendor-defined (`0xFF00..=0xFFFF`).
pub fn is_vendor_page(usage_page: u32) -> bool {
    UsagePage(usage_page).is_vendor_defined()
}

/// The name of a Usage Page.
///
/// ```
/// # use hidtree::usages::usage_page_name;
/// assert_eq!(usage_page_name(0x01), "Generic Desktop Controls");
/// assert_eq!(usage_page_name(0xff00), "Vendor-defined");
/// ```
pub fn usage_page_name(usage_page: u32) -> &'static str {
    if is_vendor_page(usage_page) {
        return "Vendor-defined";
    }
    lookup(USAGE_PAGES, usage_page).unwrap_or("Reserved")
}

/// The name of the usage `usage_id` in page `usage_page`.
///
/// This function is total: unknown usages in a page with a built-in
/// table resolve to `"Reserved"`. Usages in other assigned pages are
/// named by hut when the `hut` feature is enabled, everything else
/// resolves to `"?????"`. Vendor-defined pages never have names, their
/// usages resolve to the decimal usage id.
///
/// ```
/// # use hidtree::usages::usage_name;
/// assert_eq!(usage_name(0x01, 0x30), "X");
/// assert_eq!(usage_name(0x09, 3), "Button 3");
/// assert_eq!(usage_name(0xff00, 5), "5");
/// ```
pub fn usage_name(usage_page: u32, usage_id: u32) -> String {
    if is_vendor_page(usage_page) {
        return usage_id.to_string();
    }
    match usage_page {
        0x07 => keyboard_key_name(usage_id)
            .or_else(|| lookup(KEYBOARD_KEYPAD, usage_id).map(String::from))
            .unwrap_or_else(|| "Reserved".to_string()),
        0x09 => match usage_id {
            0 => "No button pressed".to_string(),
            n => format!("Button {n}"),
        },
        page => match page_table(page) {
            Some(table) => lookup(table, usage_id).unwrap_or("Reserved").to_string(),
            None if is_assigned_page(page) => foreign_usage_name(page, usage_id),
            None => "?????".to_string(),
        },
    }
}

/// Whether `usage_page` is a standard page with a name in [USAGE_PAGES].
/// Reserved pages are not named by hut either.
fn is_assigned_page(usage_page: u32) -> bool {
    usage_page != 0x00
        && lookup(USAGE_PAGES, usage_page).is_some_and(|name| !name.starts_with("Reserved"))
}

#[cfg(feature = "hut")]
fn foreign_usage_name(usage_page: u32, usage_id: u32) -> String {
    match (u16::try_from(usage_page), u16::try_from(usage_id)) {
        (Ok(page), Ok(id)) => hut::Usage::new_from_page_and_id(page, id)
            .map(|u| u.name())
            .unwrap_or_else(|_| "?????".to_string()),
        _ => "?????".to_string(),
    }
}

#[cfg(not(feature = "hut"))]
fn foreign_usage_name(_usage_page: u32, _usage_id: u32) -> String {
    "?????".to_string()
}

/// The name of a Collection type, Section 6.2.2.6.
pub fn collection_name(value: u32) -> &'static str {
    match value {
        0x00 => "Physical (group of axes)",
        0x01 => "Application (mouse, keyboard)",
        0x02 => "Logical (interrelated data)",
        0x03 => "Report",
        0x04 => "Named Array",
        0x05 => "Usage Switch",
        0x06 => "Usage Modifier",
        0x80..=0xff => "Vendor-defined",
        _ => "Reserved",
    }
}

/// Describe the attribute bits of an Input, Output or Feature item.
/// Set bits are marked with a `*`. The volatile bit is reserved for Input
/// items and only listed for Output and Feature items.
///
/// ```
/// # use hidtree::usages::data_flags_description;
/// # use hidtree::MainItemType;
/// assert_eq!(
///     data_flags_description(MainItemType::Input, 0x02),
///     "data *var abs no-wrap lin pref-state null-pos bit-field"
/// );
/// ```
pub fn data_flags_description(item_type: MainItemType, flags: u32) -> String {
    let set = |bit: u32| flags & (1 << bit) != 0;
    let mut s = Vec::with_capacity(9);
    s.push(if set(0) { "*const" } else { "data" });
    s.push(if set(1) { "*var" } else { "array" });
    s.push(if set(2) { "*rel" } else { "abs" });
    s.push(if set(3) { "*wrap" } else { "no-wrap" });
    s.push(if set(4) { "*non-lin" } else { "lin" });
    s.push(if set(5) { "*no-pref-state" } else { "pref-state" });
    s.push(if set(6) { "*null-state" } else { "null-pos" });
    if item_type != MainItemType::Input {
        s.push(if set(7) { "*vol" } else { "non-vol" });
    }
    s.push(if set(8) { "*buff-bytes" } else { "bit-field" });
    s.join(" ")
}

/// Describe a Unit item value, Section 6.2.2.7.
///
/// The unit is a 7-nibble value: nibble 0 selects the system, nibbles 1
/// to 6 hold the exponents of length, mass, time, temperature, current and
/// luminous intensity. Nibble 7 is reserved.
///
/// ```
/// # use hidtree::usages::unit_description;
/// assert_eq!(unit_description(0x0000_0000), "None");
/// assert_eq!(unit_description(0x0000_0014), "System(English-Rotation) Length(Degrees)");
/// ```
pub fn unit_description(unit: u32) -> String {
    let nibble = |n: u32| (unit >> (n * 4)) & 0xf;
    let system = nibble(0);
    let mut parts = Vec::new();

    if system != 0 {
        let name = match system {
            1 => "SI-Linear",
            2 => "SI-Rotation",
            3 => "English-Linear",
            4 => "English-Rotation",
            _ => "???",
        };
        parts.push(format!("System({name})"));
    }

    // The unit name of each dimension depends on the system
    let dimensions: [(&str, [&str; 4]); 6] = [
        ("Length", ["Centimeter", "Radians", "Inch", "Degrees"]),
        ("Mass", ["Gram", "Gram", "Slug", "Slug"]),
        ("Time", ["Seconds", "Seconds", "Seconds", "Seconds"]),
        ("Temperature", ["Kelvin", "Kelvin", "Fahrenheit", "Fahrenheit"]),
        ("Current", ["Ampere", "Ampere", "Ampere", "Ampere"]),
        ("Luminous-intensity", ["Candela", "Candela", "Candela", "Candela"]),
    ];
    for (n, (dimension, names)) in dimensions.iter().enumerate() {
        let exponent = nibble(n as u32 + 1);
        if exponent == 0 {
            continue;
        }
        let name = match system {
            1..=4 => names[system as usize - 1],
            _ => "???",
        };
        // Exponents are 4-bit two's complement values
        let exponent = if exponent >= 8 {
            exponent as i32 - 16
        } else {
            exponent as i32
        };
        if exponent == 1 {
            parts.push(format!("{dimension}({name})"));
        } else {
            parts.push(format!("{dimension}({name}^{exponent})"));
        }
    }

    if nibble(7) != 0 {
        warn!("use of reserved unit nibble 7 in unit {unit:#010x}");
    }

    if parts.is_empty() {
        "None".to_string()
    } else {
        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hut::AsUsage;

    #[test]
    fn generic_desktop() {
        assert_eq!(usage_name(0x01, 0x04), "Joystick");
        assert_eq!(usage_name(0x01, 0x39), "Hat switch");
        assert_eq!(usage_name(0x01, 0x09), "Reserved");
    }

    #[test]
    fn simulation_and_game() {
        assert_eq!(usage_name(0x02, 0xbb), "Throttle");
        assert_eq!(usage_name(0x02, 0xc8), "Steering");
        assert_eq!(usage_name(0x05, 0x20), "Point of View");
        assert_eq!(usage_name(0x04, 0x5f), "1 Wood");
        assert_eq!(usage_name(0x03, 0x05), "Head Tracker");
        assert_eq!(usage_name(0x06, 0x20), "Battery Strength");
    }

    #[test]
    fn keyboard() {
        assert_eq!(usage_name(0x07, 0x04), "Keyboard a and A");
        assert_eq!(usage_name(0x07, 0x1d), "Keyboard z and Z");
        assert_eq!(usage_name(0x07, 0x1e), "Keyboard 1 and !");
        assert_eq!(usage_name(0x07, 0x27), "Keyboard 0 and )");
        assert_eq!(usage_name(0x07, 0x3a), "Keyboard F1");
        assert_eq!(usage_name(0x07, 0x45), "Keyboard F12");
        assert_eq!(usage_name(0x07, 0x73), "Keyboard F24");
        assert_eq!(usage_name(0x07, 0x31), "Keyboard \\ and |");
        assert_eq!(usage_name(0x07, 0xe1), "Keyboard LeftShift");
        assert_eq!(usage_name(0x07, 0xf0), "Reserved");
    }

    #[test]
    fn buttons() {
        assert_eq!(usage_name(0x09, 0), "No button pressed");
        assert_eq!(usage_name(0x09, 1), "Button 1");
        assert_eq!(usage_name(0x09, 32), "Button 32");
    }

    #[test]
    fn vendor_pages_are_numeric() {
        assert_eq!(usage_name(0xff00, 0x0005), "5");
        assert_eq!(usage_name(0xffff, 0x30), "48");
        assert_eq!(usage_page_name(0xff42), "Vendor-defined");
    }

    #[test]
    fn tables_agree_with_hut() {
        // Usage ids of the built-in tables must match the HID Usage Tables
        assert_eq!(hut::GenericDesktop::X.usage_id_value() as u32, 0x30);
        assert_eq!(hut::GenericDesktop::Joystick.usage_id_value() as u32, 0x04);
        assert_eq!(hut::GenericDesktop::HatSwitch.usage_id_value() as u32, 0x39);
        assert_eq!(hut::SimulationControls::Throttle.usage_id_value() as u32, 0xbb);
        assert_eq!(hut::SimulationControls::Rudder.usage_id_value() as u32, 0xba);
    }

    #[cfg(feature = "hut")]
    #[test]
    fn foreign_pages_use_hut() {
        let expected = hut::Usage::new_from_page_and_id(0x0c, 0xe9).unwrap().name();
        assert_eq!(usage_name(0x0c, 0xe9), expected);
    }

    #[test]
    fn unknown_pages() {
        assert_eq!(usage_name(0x1234, 0x01), "?????");
        assert_eq!(usage_name(0x00, 0x01), "?????");
        assert_eq!(usage_name(0x8f, 0x01), "?????");
        assert_eq!(usage_page_name(0x1234), "Reserved");
    }

    #[cfg(feature = "hut")]
    #[test]
    fn reserved_pages_are_not_named_by_hut() {
        // hut resolves any 16-bit page, reserved ones included
        assert!(hut::Usage::new_from_page_and_id(0x1234, 0x01).is_ok());
        assert_eq!(usage_name(0x1234, 0x01), "?????");
        assert_eq!(usage_name(0x13, 0x01), "?????");
        assert_ne!(usage_name(0x20, 0x01), "?????");
    }

    #[cfg(not(feature = "hut"))]
    #[test]
    fn foreign_pages_without_hut() {
        assert_eq!(usage_name(0x0c, 0xe9), "?????");
        assert_eq!(usage_name(0x20, 0x01), "?????");
        assert_eq!(usage_page_name(0x0c), "Consumer");
    }

    #[test]
    fn collections() {
        assert_eq!(collection_name(0x00), "Physical (group of axes)");
        assert_eq!(collection_name(0x01), "Application (mouse, keyboard)");
        assert_eq!(collection_name(0x07), "Reserved");
        assert_eq!(collection_name(0x80), "Vendor-defined");
        assert_eq!(collection_name(0x100), "Reserved");
    }

    #[test]
    fn data_flags() {
        assert_eq!(
            data_flags_description(MainItemType::Input, 0x03),
            "*const *var abs no-wrap lin pref-state null-pos bit-field"
        );
        assert_eq!(
            data_flags_description(MainItemType::Feature, 0x82),
            "data *var abs no-wrap lin pref-state null-pos *vol bit-field"
        );
        assert_eq!(
            data_flags_description(MainItemType::Input, 0x42),
            "data *var abs no-wrap lin pref-state *null-state bit-field"
        );
    }

    #[test]
    fn units() {
        assert_eq!(unit_description(0x11), "System(SI-Linear) Length(Centimeter)");
        assert_eq!(unit_description(0x1001), "System(SI-Linear) Time(Seconds)");
        // cm/s^2
        assert_eq!(
            unit_description(0xE011),
            "System(SI-Linear) Length(Centimeter) Time(Seconds^-2)"
        );
        assert_eq!(unit_description(0x10), "Length(???)");
    }
}
