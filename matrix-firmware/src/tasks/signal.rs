// WiFi-Signal Task - Zeigt die Signalstärke eines Ziel-Netzwerks als Farbe
//
// Es wird keine Verbindung aufgebaut, der Controller läuft im Station-Modus
// und scannt nur.
use defmt::{Debug2Format, error, info, warn};
use embassy_time::{Duration, Timer};
use esp_hal_smartled::smart_led_buffer;
use esp_radio::wifi::{ClientConfig, ModeConfig, ScanConfig, WifiController};
use heapless::Vec;
use matrix_core::{
    AccessPoint, BoardError, Indicator, LedMatrix, SignalTracker, SmartLedWriter, TrackerState,
};

use crate::config::{
    BOARD, BRIGHTNESS_LIMIT, LED_COUNT, LOST_HOLD_MS, RMT_CLOCK_MHZ, SCAN_INTERVAL_MS,
    WIFI_RETRY_DELAY_SECS,
};
use crate::hal::{LedBuffer, RmtLedWriter};
use crate::tasks::{present, startup};

/// Maximale Anzahl gemerkter Treffer pro Scan (gleiche SSID, mehrere APs)
pub const MAX_SCAN_MATCHES: usize = 8;

/// Quelle für Scan-Ergebnisse
///
/// Trennt die Tracker-Schleife vom esp-radio Controller.
#[allow(async_fn_in_trait)]
pub trait NetworkScanner {
    /// Scannt alle Kanäle (`None`) oder nur einen Kanal und liefert die
    /// Access Points mit der gesuchten SSID. Ein fehlgeschlagener Scan
    /// liefert eine leere Liste.
    async fn scan(&mut self, ssid: &str, channel: Option<u8>) -> Vec<AccessPoint, MAX_SCAN_MATCHES>;
}

/// Scanner auf Basis des esp-radio WiFi-Controllers
pub struct RadioScanner {
    controller: WifiController<'static>,
}

impl RadioScanner {
    /// Startet den Controller im Station-Modus (ohne Verbindung)
    ///
    /// Wiederholt den Start in festen Abständen bis er gelingt.
    pub async fn start(mut controller: WifiController<'static>) -> Self {
        loop {
            if matches!(controller.is_started(), Ok(true)) {
                break;
            }

            info!("WiFi: Configuring and starting...");
            let client_config = ModeConfig::Client(ClientConfig::default());
            if let Err(e) = controller.set_config(&client_config) {
                error!("WiFi: Failed to set configuration: {}", Debug2Format(&e));
                Timer::after(Duration::from_secs(WIFI_RETRY_DELAY_SECS)).await;
                continue;
            }

            if let Err(e) = controller.start_async().await {
                error!("WiFi: Failed to start: {}", Debug2Format(&e));
                Timer::after(Duration::from_secs(WIFI_RETRY_DELAY_SECS)).await;
                continue;
            }

            info!("WiFi: Started successfully");
        }

        Self { controller }
    }
}

impl NetworkScanner for RadioScanner {
    async fn scan(&mut self, ssid: &str, channel: Option<u8>) -> Vec<AccessPoint, MAX_SCAN_MATCHES> {
        let config = match channel {
            Some(channel) => ScanConfig::default().with_channel(channel),
            None => ScanConfig::default(),
        };

        let mut found = Vec::new();
        match self.controller.scan_with_config_async(config).await {
            Ok(ap_infos) => {
                for ap_info in ap_infos.iter().filter(|ap| ap.ssid.as_str() == ssid) {
                    let ap = AccessPoint::new(
                        ap_info.ssid.as_str(),
                        ap_info.bssid,
                        ap_info.channel,
                        ap_info.signal_strength,
                    );
                    if found.push(ap).is_err() {
                        break;
                    }
                }
            }
            Err(e) => {
                warn!("WiFi: Scan failed: {}", Debug2Format(&e));
            }
        }
        found
    }
}

/// WiFi-Signal Logic - Testbare Tracker-Schleife
///
/// Scannt, füttert den Tracker und füllt das Panel mit der Farbe des
/// Indikators. Nach einem Signalverlust bleibt der neutrale Indikator
/// kurz stehen, bevor neu gesucht wird.
///
/// # Fehler
/// `BoardError` wenn das Board nicht in den statischen Puffer passt
pub async fn wifi_signal_logic<L, S>(
    mut led: L,
    mut scanner: S,
    target_ssid: &str,
) -> Result<(), BoardError>
where
    L: SmartLedWriter,
    S: NetworkScanner,
{
    let mut matrix = LedMatrix::<LED_COUNT>::new(BOARD)?;
    let mut tracker = SignalTracker::new(target_ssid);

    startup(&mut led, &mut matrix).await;
    info!("Signal: Suche nach '{}'", target_ssid);

    let mut last_state = tracker.state();
    loop {
        let networks = if tracker.needs_scan() {
            scanner.scan(target_ssid, tracker.scan_channel()).await
        } else {
            Vec::new()
        };
        let update = tracker.tick(&networks);

        if update.state != last_state {
            log_transition(last_state, update.state, &tracker);
            last_state = update.state;
        }

        if let Indicator::Signal { dbm, level, .. } = update.indicator {
            info!("Signal: {} dBm (Pegel {})", dbm, level);
        }

        matrix.fill(update.indicator.color());
        present(&mut led, &matrix);

        let hold_ms = match update.indicator {
            Indicator::Lost => LOST_HOLD_MS,
            _ => SCAN_INTERVAL_MS,
        };
        Timer::after(Duration::from_millis(hold_ms)).await;
    }
}

fn log_transition(from: TrackerState, to: TrackerState, tracker: &SignalTracker) {
    match to {
        TrackerState::Locked => info!(
            "Signal: {} -> Locked, BSSID {:02x}, Kanal {}",
            from,
            tracker.locked_bssid().unwrap_or_default(),
            tracker.channel().unwrap_or_default()
        ),
        TrackerState::Lost => warn!("Signal: {} -> Lost", from),
        _ => info!("Signal: {} -> {}", from, to),
    }
}

/// WiFi-Signal Task - Embassy Task
///
/// # Parameter
/// - `led_pin`: GPIO14 für die LED-Datenleitung
/// - `rmt_peripheral`: RMT Peripheral für präzises Timing
/// - `controller`: WiFi-Controller (aus esp_radio::wifi::new)
/// - `target_ssid`: gesuchtes Netzwerk
#[embassy_executor::task]
pub async fn wifi_signal_task(
    led_pin: esp_hal::peripherals::GPIO14<'static>,
    rmt_peripheral: esp_hal::peripherals::RMT<'static>,
    controller: WifiController<'static>,
    target_ssid: &'static str,
) {
    let mut rmt_buffer: LedBuffer = smart_led_buffer!(LED_COUNT);

    let led = match RmtLedWriter::new(
        led_pin,
        rmt_peripheral,
        RMT_CLOCK_MHZ,
        &mut rmt_buffer,
        BOARD.color_order(),
        BRIGHTNESS_LIMIT,
    ) {
        Ok(led) => led,
        Err(e) => {
            error!("LED: RMT Initialisierung fehlgeschlagen: {}", e);
            return;
        }
    };

    let scanner = RadioScanner::start(controller).await;

    if let Err(e) = wifi_signal_logic(led, scanner, target_ssid).await {
        error!("Signal: Board-Profil passt nicht: {}", e);
    }
}
