//! WiFi-Signal-Tracker
//!
//! Zustandsautomat, der einen Ziel-Access-Point sucht, auf dessen BSSID
//! einrastet und die Signalstärke als Farbverlauf darstellt.
//!
//! ```text
//! Discovery ──gefunden──▶ Locked ──> MISS_LIMIT Fehlscans──▶ Lost
//!                           ▲                                  │
//!                           └──gefunden── Scanning ◀───────────┘
//! ```
//!
//! Der Tracker scannt nicht selbst: der Aufrufer scannt auf dem Kanal aus
//! [`SignalTracker::scan_channel`] und reicht die Ergebnisse an
//! [`SignalTracker::tick`] weiter. Ein fehlgeschlagener Scan wird als leere
//! Liste übergeben.

use heapless::String;
use rgb::RGB8;

use crate::color::hsv_to_rgb;

/// Maximale SSID-Länge laut 802.11
pub const SSID_MAX_LEN: usize = 32;

/// Fenstergröße des Median-Filters
pub const MEDIAN_WINDOW: usize = 5;

/// Glättungsfaktor des gleitenden Mittelwerts
pub const EMA_ALPHA: f32 = 0.3;

/// Aufeinanderfolgende Fehlscans, ab denen das Signal als verloren gilt
/// (Übergang bei mehr als `MISS_LIMIT`)
pub const MISS_LIMIT: u8 = 3;

/// Schwaches Signal: untere Grenze der Farbskala (dBm)
pub const WEAK_DBM: i16 = -90;

/// Starkes Signal: obere Grenze der Farbskala (dBm)
pub const STRONG_DBM: i16 = -40;

/// Farbton bei stärkstem Signal (Grün); schwächstes Signal ist 0° (Rot)
pub const HUE_STRONG_DEG: u16 = 120;

/// Anzeige während der Suche
pub const SEARCHING_COLOR: RGB8 = RGB8 { r: 0, g: 0, b: 20 };

/// Neutrale Anzeige nach Signalverlust
pub const LOST_COLOR: RGB8 = RGB8 { r: 20, g: 20, b: 20 };

/// Ein Scan-Ergebnis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessPoint {
    pub ssid: String<SSID_MAX_LEN>,
    pub bssid: [u8; 6],
    pub channel: u8,
    /// Signalstärke in dBm
    pub rssi: i8,
}

impl AccessPoint {
    /// Erstellt einen Eintrag; zu lange SSIDs werden abgeschnitten
    pub fn new(ssid: &str, bssid: [u8; 6], channel: u8, rssi: i8) -> Self {
        let mut name = String::new();
        for ch in ssid.chars() {
            if name.push(ch).is_err() {
                break;
            }
        }
        Self {
            ssid: name,
            bssid,
            channel,
            rssi,
        }
    }
}

/// Zustand des Trackers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TrackerState {
    /// Erste Suche nach dem Start
    Discovery,
    /// Erneute Suche nach einem Signalverlust
    Scanning,
    /// Eingerastet auf BSSID und Kanal
    Locked,
    /// Signal verloren, nächster Schritt ist Scanning
    Lost,
}

/// Was auf dem Panel angezeigt werden soll
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Indicator {
    Searching,
    Signal {
        /// geglättete Signalstärke in dBm
        dbm: f32,
        /// normalisiert auf 0.0 ..= 1.0
        level: f32,
        color: RGB8,
    },
    Lost,
}

impl Indicator {
    /// Füllfarbe für das ganze Panel
    pub fn color(&self) -> RGB8 {
        match self {
            Indicator::Searching => SEARCHING_COLOR,
            Indicator::Signal { color, .. } => *color,
            Indicator::Lost => LOST_COLOR,
        }
    }
}

/// Ergebnis eines Tracker-Schritts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackerUpdate {
    pub state: TrackerState,
    pub indicator: Indicator,
    /// Kanal für den nächsten Scan (`None` = alle Kanäle)
    pub scan_channel: Option<u8>,
}

/// Median über die letzten 5 Werte, danach exponentieller Mittelwert
#[derive(Debug, Clone, Default)]
pub struct SignalFilter {
    window: [i16; MEDIAN_WINDOW],
    len: usize,
    next: usize,
    average: Option<f32>,
}

impl SignalFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Füllt das Fenster und den Mittelwert mit einem Startwert
    pub fn seed(&mut self, dbm: i16) {
        self.window = [dbm; MEDIAN_WINDOW];
        self.len = MEDIAN_WINDOW;
        self.next = 0;
        self.average = Some(f32::from(dbm));
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Neuer Messwert, liefert den geglätteten Wert
    pub fn push(&mut self, dbm: i16) -> f32 {
        self.window[self.next] = dbm;
        self.next = (self.next + 1) % MEDIAN_WINDOW;
        self.len = (self.len + 1).min(MEDIAN_WINDOW);

        let median = f32::from(self.median());
        let average = match self.average {
            Some(previous) => previous + EMA_ALPHA * (median - previous),
            None => median,
        };
        self.average = Some(average);
        average
    }

    /// Aktueller geglätteter Wert (`None` vor dem ersten Messwert)
    pub fn value(&self) -> Option<f32> {
        self.average
    }

    fn median(&self) -> i16 {
        let mut sorted = self.window;
        let samples = &mut sorted[..self.len];
        samples.sort_unstable();
        samples[self.len / 2]
    }
}

/// Normalisiert dBm linear zwischen `WEAK_DBM` und `STRONG_DBM` auf 0..=1
pub fn normalize_dbm(dbm: f32) -> f32 {
    let weak = f32::from(WEAK_DBM);
    let strong = f32::from(STRONG_DBM);
    let level = (dbm - weak) / (strong - weak);
    level.clamp(0.0, 1.0)
}

/// Farbe für einen normalisierten Pegel (0 = Rot, 1 = Grün über Gelb)
pub fn level_color(level: f32) -> RGB8 {
    let hue = (level.clamp(0.0, 1.0) * f32::from(HUE_STRONG_DEG) + 0.5) as u16;
    hsv_to_rgb(hue, 255, 255)
}

/// Der Tracker selbst
#[derive(Debug, Clone)]
pub struct SignalTracker {
    target: String<SSID_MAX_LEN>,
    state: TrackerState,
    bssid: Option<[u8; 6]>,
    channel: Option<u8>,
    misses: u8,
    filter: SignalFilter,
}

impl SignalTracker {
    /// Tracker für eine Ziel-SSID (zu lange Namen werden abgeschnitten)
    pub fn new(target_ssid: &str) -> Self {
        Self {
            target: AccessPoint::new(target_ssid, [0; 6], 0, 0).ssid,
            state: TrackerState::Discovery,
            bssid: None,
            channel: None,
            misses: 0,
            filter: SignalFilter::new(),
        }
    }

    pub fn state(&self) -> TrackerState {
        self.state
    }

    /// BSSID des eingerasteten Access Points
    pub fn locked_bssid(&self) -> Option<[u8; 6]> {
        self.bssid
    }

    pub fn channel(&self) -> Option<u8> {
        self.channel
    }

    /// Geglättete Signalstärke in dBm
    pub fn smoothed_dbm(&self) -> Option<f32> {
        self.filter.value()
    }

    /// Kanal für den nächsten Scan: nur im Locked-Zustand eingeschränkt
    pub fn scan_channel(&self) -> Option<u8> {
        match self.state {
            TrackerState::Locked => self.channel,
            _ => None,
        }
    }

    /// Ob der nächste Schritt Scan-Ergebnisse auswertet
    ///
    /// Im Lost-Zustand setzt `tick` nur zurück, ein Scan wäre verworfen.
    pub fn needs_scan(&self) -> bool {
        self.state != TrackerState::Lost
    }

    /// Ein Schritt mit den Ergebnissen des letzten Scans
    pub fn tick(&mut self, networks: &[AccessPoint]) -> TrackerUpdate {
        let indicator = match self.state {
            TrackerState::Discovery | TrackerState::Scanning => self.search(networks),
            TrackerState::Locked => self.follow(networks),
            TrackerState::Lost => {
                self.filter.reset();
                self.bssid = None;
                self.channel = None;
                self.misses = 0;
                self.state = TrackerState::Scanning;
                Indicator::Lost
            }
        };

        TrackerUpdate {
            state: self.state,
            indicator,
            scan_channel: self.scan_channel(),
        }
    }

    fn search(&mut self, networks: &[AccessPoint]) -> Indicator {
        let strongest = networks
            .iter()
            .filter(|ap| ap.ssid == self.target)
            .max_by_key(|ap| ap.rssi);

        match strongest {
            Some(ap) => {
                self.bssid = Some(ap.bssid);
                self.channel = Some(ap.channel);
                self.misses = 0;
                self.filter.seed(i16::from(ap.rssi));
                self.state = TrackerState::Locked;
                signal_indicator(f32::from(ap.rssi))
            }
            None => Indicator::Searching,
        }
    }

    fn follow(&mut self, networks: &[AccessPoint]) -> Indicator {
        let found = networks
            .iter()
            .find(|ap| Some(ap.bssid) == self.bssid)
            .map(|ap| ap.rssi);

        match found {
            Some(rssi) => {
                self.misses = 0;
                let dbm = self.filter.push(i16::from(rssi));
                signal_indicator(dbm)
            }
            None => {
                self.misses = self.misses.saturating_add(1);
                if self.misses > MISS_LIMIT {
                    self.state = TrackerState::Lost;
                }
                // Letzten Wert weiter anzeigen bis der Verlust bestätigt ist
                match self.filter.value() {
                    Some(dbm) if self.state == TrackerState::Locked => signal_indicator(dbm),
                    _ => Indicator::Lost,
                }
            }
        }
    }
}

fn signal_indicator(dbm: f32) -> Indicator {
    let level = normalize_dbm(dbm);
    Indicator::Signal {
        dbm,
        level,
        color: level_color(level),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_clamps() {
        assert_eq!(normalize_dbm(-100.0), 0.0);
        assert_eq!(normalize_dbm(-90.0), 0.0);
        assert_eq!(normalize_dbm(-65.0), 0.5);
        assert_eq!(normalize_dbm(-40.0), 1.0);
        assert_eq!(normalize_dbm(-20.0), 1.0);
    }

    #[test]
    fn test_level_color_ramp() {
        assert_eq!(level_color(0.0), RGB8 { r: 255, g: 0, b: 0 });
        assert_eq!(level_color(0.5), RGB8 { r: 255, g: 255, b: 0 });
        assert_eq!(level_color(1.0), RGB8 { r: 0, g: 255, b: 0 });
    }

    #[test]
    fn test_median_rejects_single_spike() {
        let mut filter = SignalFilter::new();
        filter.seed(-60);
        let value = filter.push(-20);
        assert_eq!(value, -60.0);
    }

    #[test]
    fn test_unseeded_filter_starts_at_first_sample() {
        let mut filter = SignalFilter::new();
        assert_eq!(filter.value(), None);
        assert_eq!(filter.push(-70), -70.0);
    }

    #[test]
    fn test_ssid_truncated() {
        let long = "abcdefghijklmnopqrstuvwxyz0123456789";
        let ap = AccessPoint::new(long, [0; 6], 1, -50);
        assert_eq!(ap.ssid.len(), SSID_MAX_LEN);
    }
}
