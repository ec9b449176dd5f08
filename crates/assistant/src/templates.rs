//! Canned response templates — `/ticket` and `/checknet`.
//!
//! Pure text, no engine call, no session mutation.

use sportello_core::Lang;

const TICKET_IT: &str = "\
🧾 **Template ticket (L2/L3)**
- **Sintesi:**
- **Utente/PC:**
- **Ambiente:**
- **Impatto/Priorità:**
- **Sintomi:**
- **Passi per riprodurre:**
- **Cambi recenti:**
- **Evidenze:**
- **Diagnosi:**
- **Azioni fatte:**
- **Soluzione/Workaround:**
- **Esito atteso:**
- **Escalation:**
";

const TICKET_ES: &str = "\
🧾 **Plantilla de ticket (L2/L3)**
- **Resumen:**
- **Usuario/Equipo:**
- **Entorno:**
- **Impacto/Prioridad:**
- **Síntomas:**
- **Pasos para reproducir:**
- **Cambios recientes:**
- **Evidencias:**
- **Diagnóstico:**
- **Acciones realizadas:**
- **Solución/Workaround:**
- **Resultado esperado:**
- **Escalado:**
";

const CHECKNET_IT: &str = "\
🌐 **Checklist rete rapida (Windows)**
1) `ipconfig /all`
2) `ping <gateway>`
3) `ping 8.8.8.8`
4) `nslookup google.com`
5) `tracert 8.8.8.8`
6) `ipconfig /flushdns`
7) `netsh winsock reset` (riavvio)
8) Proxy/VPN.
";

const CHECKNET_ES: &str = "\
🌐 **Checklist rápida de red (Windows)**
1) `ipconfig /all`
2) `ping <gateway>`
3) `ping 8.8.8.8`
4) `nslookup google.com`
5) `tracert 8.8.8.8`
6) `ipconfig /flushdns`
7) `netsh winsock reset` (reiniciar)
8) Proxy/VPN.
";

/// L2/L3 ticket skeleton.
pub fn ticket(lang: Lang) -> &'static str {
    match lang {
        Lang::It => TICKET_IT,
        Lang::Es => TICKET_ES,
    }
}

/// Quick Windows network checklist.
pub fn checknet(lang: Lang) -> &'static str {
    match lang {
        Lang::It => CHECKNET_IT,
        Lang::Es => CHECKNET_ES,
    }
}
