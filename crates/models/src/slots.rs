use serde::{Deserialize, Serialize};

/// The four fixed visit slots offered on the booking form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeSlot {
    TenAm,
    OnePm,
    FourPm,
    SevenPm,
}

impl TimeSlot {
    pub const ALL: [TimeSlot; 4] = [TimeSlot::TenAm, TimeSlot::OnePm, TimeSlot::FourPm, TimeSlot::SevenPm];

    /// Field name in the availability record.
    pub fn id(&self) -> &'static str {
        match self {
            TimeSlot::TenAm => "slot10am",
            TimeSlot::OnePm => "slot1pm",
            TimeSlot::FourPm => "slot4pm",
            TimeSlot::SevenPm => "slot7pm",
        }
    }

    /// Value submitted with the booking.
    pub fn label(&self) -> &'static str {
        match self {
            TimeSlot::TenAm => "10:00 AM",
            TimeSlot::OnePm => "1:00 PM",
            TimeSlot::FourPm => "4:00 PM",
            TimeSlot::SevenPm => "7:00 PM",
        }
    }

    pub fn from_label(label: &str) -> Option<TimeSlot> {
        TimeSlot::ALL.into_iter().find(|s| s.label() == label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlotAvailability {
    pub slot10am: bool,
    pub slot1pm: bool,
    pub slot4pm: bool,
    pub slot7pm: bool,
}

impl TimeSlotAvailability {
    pub fn all_open() -> Self {
        Self { slot10am: true, slot1pm: true, slot4pm: true, slot7pm: true }
    }

    pub fn is_open(&self, slot: TimeSlot) -> bool {
        match slot {
            TimeSlot::TenAm => self.slot10am,
            TimeSlot::OnePm => self.slot1pm,
            TimeSlot::FourPm => self.slot4pm,
            TimeSlot::SevenPm => self.slot7pm,
        }
    }

    pub fn set(&mut self, slot: TimeSlot, open: bool) {
        match slot {
            TimeSlot::TenAm => self.slot10am = open,
            TimeSlot::OnePm => self.slot1pm = open,
            TimeSlot::FourPm => self.slot4pm = open,
            TimeSlot::SevenPm => self.slot7pm = open,
        }
    }

    /// Open slots in display order.
    pub fn available(&self) -> Vec<TimeSlot> {
        TimeSlot::ALL.into_iter().filter(|s| self.is_open(*s)).collect()
    }
}

impl Default for TimeSlotAvailability {
    fn default() -> Self {
        Self::all_open()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn available_keeps_display_order() {
        let mut a = TimeSlotAvailability::all_open();
        a.set(TimeSlot::OnePm, false);
        assert_eq!(a.available(), vec![TimeSlot::TenAm, TimeSlot::FourPm, TimeSlot::SevenPm]);
    }

    #[test]
    fn labels_round_trip() {
        for slot in TimeSlot::ALL {
            assert_eq!(TimeSlot::from_label(slot.label()), Some(slot));
        }
        assert_eq!(TimeSlot::from_label("9:00 AM"), None);
    }

    #[test]
    fn wire_field_names() {
        let json = serde_json::to_value(TimeSlotAvailability::all_open()).unwrap();
        assert_eq!(json["slot10am"], true);
        assert_eq!(json["slot7pm"], true);
    }
}
