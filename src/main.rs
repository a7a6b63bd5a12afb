use anyhow::Context;
use crossbeam_channel as channel;

use fit_controller::{
    midi,
    surface::{Channel, FitSurface, GlobalEvent, GlobalEventKind, StripEvent, StripEventKind},
};

const CLIENT_NAME: &str = "FIT Controller";
const PORT_PREFIX: &str = "FIT";

fn main() -> anyhow::Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .init();

    let (msg_tx, msg_rx) = channel::unbounded();

    let midi_in = midi::MidiIn::connect(CLIENT_NAME, PORT_PREFIX, msg_tx, |_ts, buf, msg_tx| {
        let _ = msg_tx.send(midi::Msg::from(buf));
    })
    .context("couldn't find the FIT input port")?;

    let midi_out =
        midi::MidiOut::connect(CLIENT_NAME, PORT_PREFIX).context("couldn't find the FIT output port")?;

    let mut surface = FitSurface::new(midi_out);
    surface.outputs().clear_screens()?;

    // Demo wiring: echo each control back to its own strip.
    for channel in Channel::all() {
        surface.register(channel, StripEventKind::FaderMove, |mut ctx, event| {
            if let StripEvent::FaderMove(position) = event {
                let _ = ctx.set_row(1, &position.to_string());
            }
        });
        surface.register(channel, StripEventKind::KnobTurn, |mut ctx, event| {
            if let StripEvent::KnobTurn(speed) = event {
                let _ = ctx.set_row(3, &speed.to_string());
            }
        });
        surface.register(channel, StripEventKind::FaderTouch, |mut ctx, _| {
            let _ = ctx.set_row(5, "FTouch");
        });
        surface.register(channel, StripEventKind::FaderRelease, |mut ctx, _| {
            let _ = ctx.set_row(5, "");
        });
        surface.register(channel, StripEventKind::SelectPress, |mut ctx, _| {
            let _ = ctx.set_led_select(true);
        });
        surface.register(channel, StripEventKind::SelectRelease, |mut ctx, _| {
            let _ = ctx.set_led_select(false);
        });
        surface.register(channel, StripEventKind::SoloPress, |mut ctx, _| {
            let _ = ctx.set_led_solo(true);
        });
        surface.register(channel, StripEventKind::SoloRelease, |mut ctx, _| {
            let _ = ctx.set_led_solo(false);
        });
        surface.register(channel, StripEventKind::MutePress, |mut ctx, _| {
            let _ = ctx.set_led_mute(true);
        });
        surface.register(channel, StripEventKind::MuteRelease, |mut ctx, _| {
            let _ = ctx.set_led_mute(false);
        });
    }

    surface.register_global(GlobalEventKind::LayerPress, |out, event| {
        if let GlobalEvent::LayerPress(layer) = event {
            let _ = out.set_layer_led(layer, true);
        }
    });
    surface.register_global(GlobalEventKind::LayerRelease, |out, event| {
        if let GlobalEvent::LayerRelease(layer) = event {
            let _ = out.set_layer_led(layer, false);
        }
    });
    surface.register_global(GlobalEventKind::UtilPress, |out, event| {
        if let GlobalEvent::UtilPress(util) = event {
            let _ = out.set_util_led(util, true);
        }
    });
    surface.register_global(GlobalEventKind::UtilRelease, |out, event| {
        if let GlobalEvent::UtilRelease(util) = event {
            let _ = out.set_util_led(util, false);
        }
    });
    surface.register_global(GlobalEventKind::TempoPress, |out, _| {
        let _ = out.set_tempo_led(true);
    });
    surface.register_global(GlobalEventKind::TempoRelease, |out, _| {
        let _ = out.set_tempo_led(false);
    });

    log::info!("Running on {}", midi_in.port_name());

    for msg in msg_rx {
        surface.handle_msg(&msg);
    }

    Ok(())
}
