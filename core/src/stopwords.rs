// Lowercase stopword lists. Lookups lowercase the surface form first.

/// spaCy's German stop list.
pub const GERMAN: &[&str] = &[
    "á","a","ab","aber","ach","acht","achte","achten","achter","achtes","ag","alle","allein",
    "allem","allen","aller","allerdings","alles","allgemeinen","als","also","am","an","andere",
    "anderen","anderem","andern","anders","auch","auf","aus","ausser","außer","ausserdem",
    "außerdem",
    "bald","bei","beide","beiden","beim","beispiel","bekannt","bereits","besonders","besser",
    "besten","bin","bis","bisher","bist",
    "da","dabei","dadurch","dafür","dagegen","daher","dahin","dahinter","damals","damit","danach",
    "daneben","dank","dann","daran","darauf","daraus","darf","darfst","darin","darüber","darum",
    "darunter","das","dasein","daselbst","dass","daß","dasselbe","davon","davor","dazu",
    "dazwischen","dein","deine","deinem","deiner","dem","dementsprechend","demgegenüber",
    "demgemäss","demgemäß","demselben","demzufolge","den","denen","denn","denselben","der","deren",
    "derjenige","derjenigen","dermassen","dermaßen","derselbe","derselben","des","deshalb",
    "desselben","dessen","deswegen","dich","die","diejenige","diejenigen","dies","diese","dieselbe",
    "dieselben","diesem","diesen","dieser","dieses","dir","doch","dort","drei","drin","dritte",
    "dritten","dritter","drittes","du","durch","durchaus","dürfen","dürft","durfte","durften",
    "eben","ebenso","ehrlich","eigen","eigene","eigenen","eigener","eigenes","ein","einander",
    "eine","einem","einen","einer","eines","einige","einigen","einiger","einiges","einmal",
    "einmaleins","elf","en","ende","endlich","entweder","er","erst","erste","ersten","erster",
    "erstes","es","etwa","etwas","euch",
    "früher","fünf","fünfte","fünften","fünfter","fünftes","für",
    "gab","ganz","ganze","ganzen","ganzer","ganzes","gar","gedurft","gegen","gegenüber","gehabt",
    "gehen","geht","gekannt","gekonnt","gemacht","gemocht","gemusst","genug","gerade","gern",
    "gesagt","geschweige","gewesen","gewollt","geworden","gibt","ging","gleich","gross","groß",
    "grosse","große","grossen","großen","grosser","großer","grosses","großes","gut","gute","guter",
    "gutes",
    "habe","haben","habt","hast","hat","hatte","hätte","hatten","hätten","heisst","heißt","her",
    "heute","hier","hin","hinter","hoch",
    "ich","ihm","ihn","ihnen","ihr","ihre","ihrem","ihrer","ihres","im","immer","in","indem",
    "infolgedessen","ins","irgend","ist",
    "ja","jahr","jahre","jahren","je","jede","jedem","jeden","jeder","jedermann","jedermanns",
    "jedoch","jemand","jemandem","jemanden","jene","jenem","jenen","jener","jenes","jetzt",
    "kam","kann","kannst","kaum","kein","keine","keinem","keinen","keiner","kleine","kleinen",
    "kleiner","kleines","kommen","kommt","können","könnt","konnte","könnte","konnten","kurz",
    "lang","lange","leicht","leider","lieber","los",
    "machen","macht","machte","mag","magst","man","manche","manchem","manchen","mancher","manches",
    "mehr","mein","meine","meinem","meinen","meiner","meines","mensch","menschen","mich","mir",
    "mit","mittel","mochte","möchte","mochten","mögen","möglich","mögt","morgen","muss","muß",
    "müssen","musst","müsst","musste","mussten",
    "na","nach","nachdem","nahm","natürlich","neben","nein","neue","neuen","neun","neunte",
    "neunten","neunter","neuntes","nicht","nichts","nie","niemand","niemandem","niemanden","noch",
    "nun","nur",
    "ob","oben","oder","offen","oft","ohne",
    "recht","rechte","rechten","rechter","rechtes","richtig","rund",
    "sagt","sagte","sah","satt","schlecht","schon","sechs","sechste","sechsten","sechster",
    "sechstes","sehr","sei","seid","seien","sein","seine","seinem","seinen","seiner","seines",
    "seit","seitdem","selbst","sich","sie","sieben","siebente","siebenten","siebenter","siebentes",
    "siebte","siebten","siebter","siebtes","sind","so","solang","solche","solchem","solchen",
    "solcher","solches","soll","sollen","sollte","sollten","sondern","sonst","sowie","später",
    "statt",
    "tag","tage","tagen","tat","teil","tel","trotzdem","tun",
    "über","überhaupt","übrigens","uhr","um","und","uns","unser","unsere","unserer","unter",
    "vergangene","vergangenen","viel","viele","vielem","vielen","vielleicht","vier","vierte",
    "vierten","vierter","viertes","vom","von","vor",
    "wahr","während","währenddem","währenddessen","wann","war","wäre","waren","wart","warum","was",
    "wegen","weil","weit","weiter","weitere","weiteren","weiteres","welche","welchem","welchen",
    "welcher","welches","wem","wen","wenig","wenige","weniger","weniges","wenigstens","wenn","wer",
    "werde","werden","werdet","wessen","wie","wieder","will","willst","wir","wird","wirklich",
    "wirst","wo","wohl","wollen","wollt","wollte","wollten","worden","wurde","würde","wurden",
    "würden",
    "zehn","zehnte","zehnten","zehnter","zehntes","zeit","zu","zuerst","zugleich","zum","zunächst",
    "zur","zurück","zusammen","zwanzig","zwar","zwei","zweite","zweiten","zweiter","zweites",
    "zwischen",
];

pub const ENGLISH: &[&str] = &[
    "a","about","above","after","again","against","all","am","an","and","any","are","aren't","as","at",
    "be","because","been","before","being","below","between","both","but","by",
    "can","can't","cannot","could","couldn't",
    "did","didn't","do","does","doesn't","doing","don't","down","during",
    "each","few","for","from","further",
    "had","hadn't","has","hasn't","have","haven't","having","he","he'd","he'll","he's","her","here",
    "here's","hers","herself","him","himself","his","how","how's",
    "i","i'd","i'll","i'm","i've","if","in","into","is","isn't","it","it's","its","itself",
    "let's","me","more","most","mustn't","my","myself",
    "no","nor","not","of","off","on","once","only","or","other","ought","our","ours","ourselves",
    "out","over","own",
    "same","she","she'd","she'll","she's","should","shouldn't","so","some","such",
    "than","that","that's","the","their","theirs","them","themselves","then","there","there's",
    "these","they","they'd","they'll","they're","they've","this","those","through","to","too",
    "under","until","up","very",
    "was","wasn't","we","we'd","we'll","we're","we've","were","weren't","what","what's","when",
    "when's","where","where's","which","while","who","who's","whom","why","why's","with","won't",
    "would","wouldn't",
    "you","you'd","you'll","you're","you've","your","yours","yourself","yourselves",
];
